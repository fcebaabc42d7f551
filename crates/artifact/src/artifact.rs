use bytes::Bytes;

use crate::error::MalformedArtifact;
use crate::header::{Header, parse_header};

/// A compiled grammar: the raw bytes plus their parsed header.
///
/// Immutable once constructed. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarArtifact {
	header: Header,
	bytes: Bytes,
}

impl GrammarArtifact {
	/// Parses the header of `bytes` and takes ownership of the buffer.
	///
	/// # Errors
	///
	/// Returns the [`MalformedArtifact`] produced by [`parse_header`].
	pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, MalformedArtifact> {
		let bytes = bytes.into();
		let header = parse_header(&bytes)?;
		Ok(Self { header, bytes })
	}

	/// The parsed header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Binary layout revision recorded in the header.
	pub fn format_version(&self) -> u32 {
		self.header.format_version
	}

	/// Language the grammar describes.
	pub fn language_name(&self) -> &str {
		&self.header.language_name
	}

	/// Number of node kinds (symbols).
	pub fn node_kind_count(&self) -> u32 {
		self.header.node_kind_count
	}

	/// Number of named fields.
	pub fn field_count(&self) -> u32 {
		self.header.field_count
	}

	/// The complete artifact, header included.
	pub fn as_bytes(&self) -> &Bytes {
		&self.bytes
	}

	/// The opaque parse table following the header.
	///
	/// Returned as a shared view into the same buffer.
	pub fn table(&self) -> Bytes {
		self.bytes.slice(self.header.encoded_len()..)
	}
}
