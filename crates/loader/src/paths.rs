//! Grammar search path configuration.
//!
//! Compiled artifacts are looked up by file name in an ordered list of
//! directories. `GRAMMARKIT_RUNTIME` takes precedence for development
//! checkouts, followed by the user cache and data directories.

use std::path::PathBuf;

/// Environment variable naming a runtime directory with a `grammars/` subdir.
pub const RUNTIME_ENV: &str = "GRAMMARKIT_RUNTIME";

/// File extension of compiled grammar artifacts.
pub const ARTIFACT_EXTENSION: &str = "grammar";

/// Canonical form of a grammar name: `-` and `_` are interchangeable.
pub fn normalize_grammar_name(name: &str) -> String {
	name.replace('-', "_")
}

/// Returns the artifact file name for a grammar.
pub fn grammar_file_name(name: &str) -> String {
	format!("{}.{ARTIFACT_EXTENSION}", normalize_grammar_name(name))
}

/// Returns directories searched for compiled grammar artifacts, in order.
///
/// `$GRAMMARKIT_RUNTIME/grammars`, then `<cache>/grammarkit/grammars`, then
/// `<data>/grammarkit/grammars`.
pub fn grammar_search_paths() -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(runtime) = std::env::var_os(RUNTIME_ENV) {
		paths.push(PathBuf::from(runtime).join("grammars"));
	}

	if let Some(cache) = cache_dir() {
		paths.push(cache.join("grammars"));
	}

	if let Some(data) = dirs::data_local_dir() {
		paths.push(data.join("grammarkit").join("grammars"));
	}

	paths
}

/// Returns the cache directory, e.g. `~/.cache/grammarkit/`.
pub fn cache_dir() -> Option<PathBuf> {
	dirs::cache_dir().map(|p| p.join("grammarkit"))
}
