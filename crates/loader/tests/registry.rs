//! Integration tests for manifest-driven loading of the checked-in fixtures.

#![allow(unused_crate_dependencies)]

use std::path::PathBuf;
use std::sync::Arc;

use grammarkit_loader::{CompatibilityRange, GrammarLoader, GrammarRegistry, LoadErrorKind, LoaderConfig};

fn fixtures_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn test_can_load_grammar() {
	let loader = GrammarLoader::new(LoaderConfig::empty(CompatibilityRange::RUNTIME).with_search_path(fixtures_dir()));
	let handle = loader.load_named("pluto").unwrap_or_else(|e| panic!("Error loading PLUTO grammar: {e}"));

	assert_eq!(handle.language_name(), "pluto");
	assert_eq!(handle.format_version(), 14);
	assert_eq!(handle.node_kind_count(), 120);
	assert_eq!(handle.field_count(), 18);
	assert_eq!(handle.artifact().table().len(), 64);
}

#[test]
fn test_manifest_drives_registry() {
	let config = LoaderConfig::load_file(&fixtures_dir().join("grammars.kdl")).expect("fixture manifest parses");
	assert_eq!(config.compat, CompatibilityRange::RUNTIME);
	assert_eq!(config.grammar("pluto").map(|g| g.path.clone()), Some(fixtures_dir().join("pluto.grammar")));

	let registry = GrammarRegistry::new(GrammarLoader::new(config));
	let results = registry.load_all();

	assert_eq!(results.len(), 2);
	let (name, pluto) = &results[0];
	assert_eq!(name, "pluto");
	assert_eq!(pluto.as_ref().map(|h| h.language_name()).ok(), Some("pluto"));

	let (name, missing) = &results[1];
	assert_eq!(name, "missing");
	let err = missing.as_ref().unwrap_err();
	assert_eq!(err.kind(), LoadErrorKind::NotFound);
	assert!(err.to_string().contains("missing.grammar"));

	assert_eq!(registry.names(), vec!["pluto".to_string()]);
}

#[test]
fn test_manifest_range_rejects_fixture() {
	let dir = tempfile::tempdir().unwrap();
	let manifest = dir.path().join("grammars.kdl");
	let fixture = fixtures_dir().join("pluto.grammar");
	std::fs::write(&manifest, format!("compat min=9 max=13\ngrammar pluto path={:?}\n", fixture.display().to_string())).unwrap();

	let loader = GrammarLoader::new(LoaderConfig::load_file(&manifest).unwrap());
	let err = loader.load_named("pluto").unwrap_err();
	assert_eq!(err.kind(), LoadErrorKind::IncompatibleVersion);
	assert_eq!(err.to_string(), format!("incompatible grammar {}: format version 14 outside supported range [9, 13]", fixture.display()));
}

#[test]
fn test_registry_shared_across_threads() {
	let registry = Arc::new(GrammarRegistry::new(GrammarLoader::new(
		LoaderConfig::empty(CompatibilityRange::RUNTIME).with_search_path(fixtures_dir()),
	)));

	let handles: Vec<_> = (0..4)
		.map(|_| {
			let registry = Arc::clone(&registry);
			std::thread::spawn(move || registry.get("pluto").map(|h| h.node_kind_count()))
		})
		.collect();

	for handle in handles {
		assert_eq!(handle.join().unwrap().ok(), Some(120));
	}
	assert_eq!(registry.len(), 1);
}
