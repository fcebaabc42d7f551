//! Fixed-layout artifact header.
//!
//! All integers are little-endian:
//!
//! ```text
//! 0   magic            8 bytes  b"TSGRAMMR"
//! 8   format_version   u32
//! 12  node_kind_count  u32
//! 16  field_count      u32
//! 20  name_len         u16
//! 22  language name    name_len bytes, UTF-8
//! ..  table            opaque, runs to the end of the artifact
//! ```

use std::mem::size_of;

use crate::error::MalformedArtifact;

/// Magic bytes identifying a compiled grammar artifact.
pub const MAGIC: &[u8; 8] = b"TSGRAMMR";

/// Size of the fixed part of the header (everything before the name).
pub const MIN_HEADER_SIZE: usize = MAGIC.len() + 3 * size_of::<u32>() + size_of::<u16>();

/// Largest node-kind count; symbol ids are 16-bit in the parsing runtime.
pub const MAX_NODE_KINDS: u32 = u16::MAX as u32;

/// Largest field count; field ids are 16-bit in the parsing runtime.
pub const MAX_FIELDS: u32 = u16::MAX as u32;

const VERSION_OFFSET: usize = 8;
const NODE_KINDS_OFFSET: usize = 12;
const FIELDS_OFFSET: usize = 16;
const NAME_LEN_OFFSET: usize = 20;

/// Structured view of an artifact header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
	/// Binary layout revision the artifact was compiled against.
	pub format_version: u32,
	/// Name of the language the grammar describes (e.g. `pluto`).
	pub language_name: String,
	/// Number of node kinds (symbols) in the grammar.
	pub node_kind_count: u32,
	/// Number of named fields in the grammar.
	pub field_count: u32,
}

impl Header {
	/// Number of bytes this header occupies once encoded.
	///
	/// The opaque table starts at this offset.
	pub fn encoded_len(&self) -> usize {
		MIN_HEADER_SIZE + self.language_name.len()
	}

	/// Checks every field against the limits enforced by [`parse_header`].
	pub fn validate(&self) -> Result<(), MalformedArtifact> {
		check_count("node_kind_count", self.node_kind_count, MAX_NODE_KINDS)?;
		check_count("field_count", self.field_count, MAX_FIELDS)?;
		validate_name(&self.language_name)?;
		if self.language_name.len() > u16::MAX as usize {
			return Err(MalformedArtifact::CountOutOfRange {
				field: "name_len",
				value: self.language_name.len() as u32,
				max: u16::MAX as u32,
			});
		}
		Ok(())
	}

	/// Appends the encoded header to `buf`.
	///
	/// Callers are expected to have run [`Header::validate`].
	pub(crate) fn write_to(&self, buf: &mut Vec<u8>) {
		buf.reserve(self.encoded_len());
		buf.extend_from_slice(MAGIC);
		buf.extend_from_slice(&self.format_version.to_le_bytes());
		buf.extend_from_slice(&self.node_kind_count.to_le_bytes());
		buf.extend_from_slice(&self.field_count.to_le_bytes());
		buf.extend_from_slice(&(self.language_name.len() as u16).to_le_bytes());
		buf.extend_from_slice(self.language_name.as_bytes());
	}
}

/// Reads and validates the header at the start of `data`.
///
/// # Errors
///
/// * [`MalformedArtifact::Truncated`] if `data` is shorter than
///   [`MIN_HEADER_SIZE`] or the name runs past the end.
/// * [`MalformedArtifact::BadMagic`] if the magic bytes do not match.
/// * [`MalformedArtifact::CountOutOfRange`] for counts above 16-bit ids.
/// * [`MalformedArtifact::EmptyName`], [`MalformedArtifact::NameNotUtf8`] or
///   [`MalformedArtifact::InvalidName`] for a bad language name.
pub fn parse_header(data: &[u8]) -> Result<Header, MalformedArtifact> {
	if data.len() < MIN_HEADER_SIZE {
		return Err(MalformedArtifact::Truncated {
			needed: MIN_HEADER_SIZE,
			actual: data.len(),
		});
	}

	let mut found = [0u8; 8];
	found.copy_from_slice(&data[..MAGIC.len()]);
	if &found != MAGIC {
		return Err(MalformedArtifact::BadMagic { found });
	}

	let format_version = read_u32(data, VERSION_OFFSET);
	let node_kind_count = read_u32(data, NODE_KINDS_OFFSET);
	let field_count = read_u32(data, FIELDS_OFFSET);
	check_count("node_kind_count", node_kind_count, MAX_NODE_KINDS)?;
	check_count("field_count", field_count, MAX_FIELDS)?;

	let name_len = u16::from_le_bytes([data[NAME_LEN_OFFSET], data[NAME_LEN_OFFSET + 1]]) as usize;
	let name_end = MIN_HEADER_SIZE + name_len;
	let Some(name_bytes) = data.get(MIN_HEADER_SIZE..name_end) else {
		return Err(MalformedArtifact::Truncated {
			needed: name_end,
			actual: data.len(),
		});
	};
	let language_name = std::str::from_utf8(name_bytes).map_err(|_| MalformedArtifact::NameNotUtf8)?;
	validate_name(language_name)?;

	Ok(Header {
		format_version,
		language_name: language_name.to_owned(),
		node_kind_count,
		field_count,
	})
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
	let mut raw = [0u8; 4];
	raw.copy_from_slice(&data[offset..offset + 4]);
	u32::from_le_bytes(raw)
}

fn check_count(field: &'static str, value: u32, max: u32) -> Result<(), MalformedArtifact> {
	if value > max {
		return Err(MalformedArtifact::CountOutOfRange { field, value, max });
	}
	Ok(())
}

/// Checks that `name` is a non-empty run of `[A-Za-z0-9_-]`.
///
/// Names passing this check contain no path separators.
pub fn validate_name(name: &str) -> Result<(), MalformedArtifact> {
	if name.is_empty() {
		return Err(MalformedArtifact::EmptyName);
	}
	if let Some(ch) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-')) {
		return Err(MalformedArtifact::InvalidName { name: name.to_owned(), ch });
	}
	Ok(())
}
