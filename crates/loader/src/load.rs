//! The version-checked load transaction.

use std::sync::Arc;

use bytes::Bytes;
use grammarkit_artifact::{GrammarArtifact, Header};
use tracing::{debug, info, warn};

use crate::compat::CompatibilityRange;
use crate::error::LoadError;
use crate::source::{GrammarSource, SourceId};

/// A validated grammar, ready to hand to a parsing engine.
///
/// Only [`load`] (and the wrappers around it) construct handles, and only
/// for artifacts whose format version lies inside the range recorded here.
#[derive(Debug, Clone)]
pub struct LoaderHandle {
	artifact: Arc<GrammarArtifact>,
	compat: CompatibilityRange,
	source: GrammarSource,
}

impl LoaderHandle {
	pub fn artifact(&self) -> &GrammarArtifact {
		&self.artifact
	}

	pub fn header(&self) -> &Header {
		self.artifact.header()
	}

	pub fn language_name(&self) -> &str {
		self.artifact.language_name()
	}

	pub fn format_version(&self) -> u32 {
		self.artifact.format_version()
	}

	pub fn node_kind_count(&self) -> u32 {
		self.artifact.node_kind_count()
	}

	pub fn field_count(&self) -> u32 {
		self.artifact.field_count()
	}

	/// The range that accepted this artifact.
	pub fn compat(&self) -> CompatibilityRange {
		self.compat
	}

	pub fn source(&self) -> &GrammarSource {
		&self.source
	}

	/// True when both handles refer to the same loaded artifact.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.artifact, &other.artifact)
	}
}

/// Loads and validates a grammar artifact.
///
/// Reads `source`, parses the header and checks its format version against
/// `compat`. Either a complete handle is returned or nothing is.
///
/// # Errors
///
/// * [`LoadError::NotFound`] if the file cannot be read.
/// * [`LoadError::Malformed`] if the header is invalid; the
///   [`MalformedArtifact`](grammarkit_artifact::MalformedArtifact) is kept intact.
/// * [`LoadError::IncompatibleVersion`] if the version is outside `compat`.
pub fn load(source: &GrammarSource, compat: CompatibilityRange) -> Result<LoaderHandle, LoadError> {
	let source_id = source.id();
	let bytes = read_source(source, &source_id)?;

	let artifact = GrammarArtifact::from_bytes(bytes).map_err(|error| {
		warn!(source = %source_id, %error, "Rejected malformed grammar artifact");
		LoadError::Malformed {
			source_id: source_id.clone(),
			error,
		}
	})?;

	let actual = artifact.format_version();
	if !compat.contains(actual) {
		warn!(
			source = %source_id,
			grammar = artifact.language_name(),
			version = actual,
			range = %compat,
			"Rejected incompatible grammar artifact"
		);
		return Err(LoadError::IncompatibleVersion {
			source_id,
			actual,
			range: compat,
		});
	}

	info!(
		source = %source_id,
		grammar = artifact.language_name(),
		version = actual,
		node_kinds = artifact.node_kind_count(),
		"Loaded grammar"
	);

	Ok(LoaderHandle {
		artifact: Arc::new(artifact),
		compat,
		source: source.clone(),
	})
}

/// Loads the handle's source again with the same range.
///
/// The returned handle owns a freshly read artifact; `handle` is untouched.
pub fn reload(handle: &LoaderHandle) -> Result<LoaderHandle, LoadError> {
	debug!(source = %handle.source.id(), "Reloading grammar");
	load(&handle.source, handle.compat)
}

fn read_source(source: &GrammarSource, source_id: &SourceId) -> Result<Bytes, LoadError> {
	match source {
		GrammarSource::Bytes { bytes, .. } => Ok(bytes.clone()),
		GrammarSource::Path(path) => {
			debug!(path = %path.display(), "Reading grammar artifact");
			std::fs::read(path).map(Bytes::from).map_err(|e| {
				debug!(path = %path.display(), error = %e, "Grammar artifact unreadable");
				LoadError::not_found(source_id.clone(), Some(e))
			})
		}
	}
}
