//! Caching registry of loaded grammars.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::load::LoaderHandle;
use crate::loader::GrammarLoader;
use crate::paths::normalize_grammar_name;

/// Grammars loaded by name, cached for reuse.
///
/// Only successful loads are cached, keyed by the normalized name so `c-sharp`
/// and `c_sharp` share an entry. Loads run outside the lock; when two threads
/// race on the same name the first inserted handle is kept.
#[derive(Debug, Default)]
pub struct GrammarRegistry {
	loader: GrammarLoader,
	handles: RwLock<HashMap<String, LoaderHandle>>,
}

impl GrammarRegistry {
	pub fn new(loader: GrammarLoader) -> Self {
		Self {
			loader,
			handles: RwLock::new(HashMap::new()),
		}
	}

	pub fn loader(&self) -> &GrammarLoader {
		&self.loader
	}

	/// Returns the cached handle for `name`, loading it on first use.
	pub fn get(&self, name: &str) -> Result<LoaderHandle, LoadError> {
		let key = normalize_grammar_name(name);
		if let Some(handle) = self.handles.read().get(&key) {
			return Ok(handle.clone());
		}

		let handle = self.loader.load_named(name)?;
		Ok(self.handles.write().entry(key).or_insert(handle).clone())
	}

	/// Returns the cached handle without loading.
	pub fn cached(&self, name: &str) -> Option<LoaderHandle> {
		self.handles.read().get(&normalize_grammar_name(name)).cloned()
	}

	/// Loads `name` again and replaces the cached handle.
	///
	/// Handles previously returned keep the old artifact. On failure the
	/// cache is left unchanged.
	pub fn reload(&self, name: &str) -> Result<LoaderHandle, LoadError> {
		debug!(grammar = name, "Reloading grammar");
		let handle = self.loader.load_named(name)?;
		self.handles.write().insert(normalize_grammar_name(name), handle.clone());
		Ok(handle)
	}

	/// Loads every grammar declared in the manifest.
	///
	/// Failures are logged and returned alongside the grammar name.
	pub fn load_all(&self) -> Vec<(String, Result<LoaderHandle, LoadError>)> {
		self.loader
			.config()
			.grammars
			.iter()
			.map(|entry| {
				let result = self.get(&entry.name);
				if let Err(e) = &result {
					warn!(grammar = %entry.name, error = %e, "Failed to load grammar");
				}
				(entry.name.clone(), result)
			})
			.collect()
	}

	/// Drops the cached handle for `name`, returning it.
	pub fn evict(&self, name: &str) -> Option<LoaderHandle> {
		self.handles.write().remove(&normalize_grammar_name(name))
	}

	/// Normalized names of cached grammars, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<_> = self.handles.read().keys().cloned().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.handles.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.read().is_empty()
	}
}

#[cfg(test)]
mod tests {
	use grammarkit_artifact::ArtifactWriter;

	use super::*;
	use crate::compat::CompatibilityRange;
	use crate::config::LoaderConfig;
	use crate::error::LoadErrorKind;

	fn registry_in(dir: &std::path::Path) -> GrammarRegistry {
		GrammarRegistry::new(GrammarLoader::new(LoaderConfig::empty(CompatibilityRange::RUNTIME).with_search_path(dir)))
	}

	fn write(dir: &std::path::Path, name: &str, version: u32) {
		let bytes = ArtifactWriter::new(version, name).to_bytes().unwrap();
		std::fs::write(dir.join(format!("{name}.grammar")), bytes).unwrap();
	}

	#[test]
	fn test_get_caches() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), "pluto", 14);
		let registry = registry_in(dir.path());

		assert!(registry.is_empty());
		let a = registry.get("pluto").unwrap();
		let b = registry.get("pluto").unwrap();
		assert!(a.ptr_eq(&b));
		assert_eq!(registry.names(), vec!["pluto".to_string()]);
	}

	#[test]
	fn test_failures_not_cached() {
		let dir = tempfile::tempdir().unwrap();
		let registry = registry_in(dir.path());

		assert_eq!(registry.get("pluto").unwrap_err().kind(), LoadErrorKind::NotFound);
		assert!(registry.cached("pluto").is_none());

		write(dir.path(), "pluto", 14);
		assert!(registry.get("pluto").is_ok());
	}

	#[test]
	fn test_reload_replaces_entry_and_keeps_old_handle() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), "pluto", 14);
		let registry = registry_in(dir.path());
		let old = registry.get("pluto").unwrap();

		write(dir.path(), "pluto", 15);
		let new = registry.reload("pluto").unwrap();

		assert_eq!(old.format_version(), 14);
		assert_eq!(new.format_version(), 15);
		assert!(registry.cached("pluto").unwrap().ptr_eq(&new));
	}

	#[test]
	fn test_failed_reload_keeps_cache() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), "pluto", 14);
		let registry = registry_in(dir.path());
		let old = registry.get("pluto").unwrap();

		write(dir.path(), "pluto", 99);
		assert_eq!(registry.reload("pluto").unwrap_err().kind(), LoadErrorKind::IncompatibleVersion);
		assert!(registry.cached("pluto").unwrap().ptr_eq(&old));
	}

	#[test]
	fn test_dash_and_underscore_share_entry() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), "c_sharp", 14);
		let registry = registry_in(dir.path());

		let a = registry.get("c-sharp").unwrap();
		let b = registry.get("c_sharp").unwrap();
		assert!(a.ptr_eq(&b));
		assert_eq!(registry.len(), 1);
		assert!(registry.cached("c-sharp").is_some());
		assert!(registry.evict("c_sharp").is_some());
		assert!(registry.is_empty());
	}

	#[test]
	fn test_foreign_or_escaping_grammars_not_cached() {
		let search = tempfile::tempdir().unwrap();
		let outside = tempfile::tempdir().unwrap();
		write(outside.path(), "json", 14);
		let absolute = outside.path().join("json").display().to_string();
		let bytes = ArtifactWriter::new(14, "json").to_bytes().unwrap();
		std::fs::write(search.path().join("pluto.grammar"), bytes).unwrap();
		let registry = registry_in(search.path());

		assert_eq!(registry.get(&absolute).unwrap_err().kind(), LoadErrorKind::NotFound);
		assert_eq!(registry.get("pluto").unwrap_err().kind(), LoadErrorKind::MalformedArtifact);
		assert!(registry.is_empty());
	}

	#[test]
	fn test_evict() {
		let dir = tempfile::tempdir().unwrap();
		write(dir.path(), "pluto", 14);
		let registry = registry_in(dir.path());
		registry.get("pluto").unwrap();

		assert!(registry.evict("pluto").is_some());
		assert_eq!(registry.len(), 0);
		assert!(registry.evict("pluto").is_none());
	}
}
