//! Artifact encoding for grammar compilers and test fixtures.

use bytes::Bytes;

use crate::artifact::GrammarArtifact;
use crate::error::MalformedArtifact;
use crate::header::Header;

/// Builds artifact bytes from header fields and an opaque table.
///
/// ```
/// use grammarkit_artifact::{ArtifactWriter, parse_header};
///
/// let bytes = ArtifactWriter::new(14, "pluto").node_kinds(120).to_bytes().unwrap();
/// assert_eq!(parse_header(&bytes).unwrap().language_name, "pluto");
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
	header: Header,
	table: Bytes,
}

impl ArtifactWriter {
	/// Starts an artifact with zero node kinds, zero fields and an empty table.
	pub fn new(format_version: u32, language_name: impl Into<String>) -> Self {
		Self::from_header(Header {
			format_version,
			language_name: language_name.into(),
			node_kind_count: 0,
			field_count: 0,
		})
	}

	/// Starts an artifact from a complete header.
	pub fn from_header(header: Header) -> Self {
		Self { header, table: Bytes::new() }
	}

	/// Sets the node-kind count.
	pub fn node_kinds(mut self, count: u32) -> Self {
		self.header.node_kind_count = count;
		self
	}

	/// Sets the field count.
	pub fn fields(mut self, count: u32) -> Self {
		self.header.field_count = count;
		self
	}

	/// Sets the opaque table written after the header.
	pub fn table(mut self, table: impl Into<Bytes>) -> Self {
		self.table = table.into();
		self
	}

	/// Encodes the artifact.
	///
	/// # Errors
	///
	/// Refuses headers that [`parse_header`](crate::parse_header) would
	/// reject, so every written artifact reads back.
	pub fn to_bytes(&self) -> Result<Bytes, MalformedArtifact> {
		self.header.validate()?;
		let mut buf = Vec::with_capacity(self.header.encoded_len() + self.table.len());
		self.header.write_to(&mut buf);
		buf.extend_from_slice(&self.table);
		Ok(Bytes::from(buf))
	}

	/// Encodes the artifact and reads it back as a [`GrammarArtifact`].
	pub fn build(self) -> Result<GrammarArtifact, MalformedArtifact> {
		let bytes = self.to_bytes()?;
		GrammarArtifact::from_bytes(bytes)
	}
}
