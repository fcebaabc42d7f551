//! Name-based loading on top of [`load`].

use std::path::PathBuf;

use grammarkit_artifact::{MalformedArtifact, validate_name};
use tracing::{debug, warn};

use crate::compat::CompatibilityRange;
use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::load::{LoaderHandle, load};
use crate::paths::{grammar_file_name, normalize_grammar_name};
use crate::source::{GrammarSource, SourceId};

/// Resolves grammar names to artifacts and loads them.
///
/// Holds only immutable configuration, so a single loader can be shared
/// across threads and every call is an independent transaction.
#[derive(Debug, Clone, Default)]
pub struct GrammarLoader {
	config: LoaderConfig,
}

impl GrammarLoader {
	/// Creates a loader over a fixed configuration.
	pub fn new(config: LoaderConfig) -> Self {
		Self { config }
	}

	/// The configuration this loader resolves against.
	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Range every load through this loader is checked against.
	pub fn compat(&self) -> CompatibilityRange {
		self.config.compat
	}

	/// Finds the artifact file for `name`.
	///
	/// Manifest entries win; otherwise the first search path containing
	/// `<name>.grammar` is used. A manifest entry is returned even if the
	/// file is missing, so the read reports the precise path.
	///
	/// Names outside `[A-Za-z0-9_-]` never resolve.
	pub fn resolve(&self, name: &str) -> Result<PathBuf, LoadError> {
		if let Err(error) = validate_name(name) {
			debug!(grammar = name, %error, "Rejected grammar name");
			return Err(LoadError::not_found(SourceId::Named(name.to_owned()), None));
		}

		if let Some(entry) = self.config.grammar(name) {
			return Ok(entry.path.clone());
		}

		let file_name = grammar_file_name(name);
		for dir in &self.config.search_paths {
			let path = dir.join(&file_name);
			if path.is_file() {
				debug!(grammar = name, path = %path.display(), "Resolved grammar");
				return Ok(path);
			}
		}

		debug!(grammar = name, searched = self.config.search_paths.len(), "Grammar not in any search path");
		Err(LoadError::not_found(SourceId::Named(name.to_owned()), None))
	}

	/// Resolves and loads a grammar by name.
	///
	/// The artifact's language name must match `name`, treating `-` and `_`
	/// as equal; otherwise the load fails with
	/// [`MalformedArtifact::LanguageMismatch`].
	pub fn load_named(&self, name: &str) -> Result<LoaderHandle, LoadError> {
		let path = self.resolve(name)?;
		let handle = load(&GrammarSource::Path(path), self.config.compat)?;

		if normalize_grammar_name(handle.language_name()) != normalize_grammar_name(name) {
			warn!(grammar = name, found = handle.language_name(), "Grammar artifact describes another language");
			return Err(LoadError::Malformed {
				source_id: handle.source().id(),
				error: MalformedArtifact::LanguageMismatch {
					requested: name.to_owned(),
					found: handle.language_name().to_owned(),
				},
			});
		}

		Ok(handle)
	}

	/// Loads an explicit source with this loader's range.
	pub fn load(&self, source: &GrammarSource) -> Result<LoaderHandle, LoadError> {
		load(source, self.config.compat)
	}
}
