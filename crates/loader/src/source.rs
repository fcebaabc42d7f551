//! Where artifact bytes come from.

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Source of a grammar artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarSource {
	/// Artifact bytes already in memory, labelled for diagnostics.
	Bytes { name: String, bytes: Bytes },
	/// An artifact file on disk.
	Path(PathBuf),
}

impl GrammarSource {
	pub fn bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
		Self::Bytes {
			name: name.into(),
			bytes: bytes.into(),
		}
	}

	pub fn path(path: impl Into<PathBuf>) -> Self {
		Self::Path(path.into())
	}

	/// Identifier used in logs and error messages.
	pub fn id(&self) -> SourceId {
		match self {
			Self::Bytes { name, .. } => SourceId::Named(name.clone()),
			Self::Path(path) => SourceId::Path(path.clone()),
		}
	}

	pub fn as_path(&self) -> Option<&Path> {
		match self {
			Self::Path(path) => Some(path),
			Self::Bytes { .. } => None,
		}
	}
}

impl From<PathBuf> for GrammarSource {
	fn from(path: PathBuf) -> Self {
		Self::Path(path)
	}
}

impl From<&Path> for GrammarSource {
	fn from(path: &Path) -> Self {
		Self::Path(path.to_path_buf())
	}
}

/// Identifies the source an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
	/// In-memory bytes or a grammar name that did not resolve.
	Named(String),
	Path(PathBuf),
}

impl fmt::Display for SourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(name) => write!(f, "'{name}'"),
			Self::Path(path) => write!(f, "{}", path.display()),
		}
	}
}
