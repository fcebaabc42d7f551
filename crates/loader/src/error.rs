//! Load failures.

use grammarkit_artifact::MalformedArtifact;
use thiserror::Error;

use crate::compat::CompatibilityRange;
use crate::source::SourceId;

/// Errors that can occur when loading a grammar.
///
/// Each variant names the offending source. Nothing is retried: a caller
/// wanting a different outcome supplies a different source or range.
#[derive(Error, Debug)]
pub enum LoadError {
	/// The source could not be located or read.
	#[error("grammar not found: {source_id}")]
	NotFound {
		source_id: SourceId,
		/// Underlying read failure, absent when no search path matched.
		#[source]
		io: Option<std::io::Error>,
	},

	/// Bytes were read but the header is invalid.
	#[error("malformed grammar artifact {source_id}: {error}")]
	Malformed {
		source_id: SourceId,
		#[source]
		error: MalformedArtifact,
	},

	/// The header is valid but its format version is not supported.
	#[error("incompatible grammar {source_id}: format version {actual} outside supported range {range}")]
	IncompatibleVersion {
		source_id: SourceId,
		actual: u32,
		range: CompatibilityRange,
	},
}

/// Which of the three load failures occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
	NotFound,
	MalformedArtifact,
	IncompatibleVersion,
}

impl LoadError {
	pub fn kind(&self) -> LoadErrorKind {
		match self {
			Self::NotFound { .. } => LoadErrorKind::NotFound,
			Self::Malformed { .. } => LoadErrorKind::MalformedArtifact,
			Self::IncompatibleVersion { .. } => LoadErrorKind::IncompatibleVersion,
		}
	}

	pub fn source_id(&self) -> &SourceId {
		match self {
			Self::NotFound { source_id, .. } | Self::Malformed { source_id, .. } | Self::IncompatibleVersion { source_id, .. } => source_id,
		}
	}

	/// The header problem, for [`LoadError::Malformed`].
	pub fn malformed(&self) -> Option<&MalformedArtifact> {
		match self {
			Self::Malformed { error, .. } => Some(error),
			_ => None,
		}
	}

	pub(crate) fn not_found(source_id: SourceId, io: Option<std::io::Error>) -> Self {
		Self::NotFound { source_id, io }
	}
}

#[cfg(test)]
mod tests {
	use std::error::Error as _;

	use super::*;

	#[test]
	fn test_incompatible_message_names_versions_and_source() {
		let err = LoadError::IncompatibleVersion {
			source_id: SourceId::Named("pluto".into()),
			actual: 14,
			range: CompatibilityRange::new(9, 13).unwrap(),
		};
		assert_eq!(
			err.to_string(),
			"incompatible grammar 'pluto': format version 14 outside supported range [9, 13]"
		);
		assert_eq!(err.kind(), LoadErrorKind::IncompatibleVersion);
	}

	#[test]
	fn test_malformed_keeps_original_error() {
		let inner = MalformedArtifact::Truncated { needed: 22, actual: 0 };
		let err = LoadError::Malformed {
			source_id: SourceId::Named("empty".into()),
			error: inner.clone(),
		};
		assert_eq!(err.malformed(), Some(&inner));
		let source = err.source().and_then(|s| s.downcast_ref::<MalformedArtifact>());
		assert_eq!(source, Some(&inner));
	}

	#[test]
	fn test_not_found_without_io() {
		let err = LoadError::not_found(SourceId::Named("nope".into()), None);
		assert_eq!(err.to_string(), "grammar not found: 'nope'");
		assert!(err.source().is_none());
		assert_eq!(err.source_id(), &SourceId::Named("nope".into()));
	}
}
