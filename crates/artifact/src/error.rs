//! Header validation errors.

use thiserror::Error;

/// An artifact whose bytes do not form a valid header.
///
/// Every variant describes the first problem found while reading the fixed
/// prefix. The opaque table after the header is never inspected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedArtifact {
	/// Fewer bytes than the header needs.
	#[error("artifact truncated: need {needed} bytes, got {actual}")]
	Truncated {
		/// Bytes required to read the header up to the failing field.
		needed: usize,
		/// Bytes actually available.
		actual: usize,
	},

	/// The leading magic bytes do not identify a grammar artifact.
	#[error("bad magic bytes {found:02x?}")]
	BadMagic {
		/// The eight bytes found at the start of the artifact.
		found: [u8; 8],
	},

	/// A count field exceeds what the parsing runtime can address.
	#[error("{field} out of range: {value} (max {max})")]
	CountOutOfRange {
		/// Header field name.
		field: &'static str,
		/// Value read from the artifact.
		value: u32,
		/// Largest accepted value.
		max: u32,
	},

	/// The name length field is zero.
	#[error("language name is empty")]
	EmptyName,

	/// The name bytes do not decode as UTF-8.
	#[error("language name is not valid UTF-8")]
	NameNotUtf8,

	/// The name contains a character outside `[A-Za-z0-9_-]`.
	#[error("invalid character {ch:?} in language name {name:?}")]
	InvalidName {
		/// The decoded name.
		name: String,
		/// First offending character.
		ch: char,
	},

	/// The artifact describes a different language than the one requested.
	#[error("requested grammar {requested:?} but artifact describes {found:?}")]
	LanguageMismatch {
		/// Grammar name the caller asked for.
		requested: String,
		/// Language name in the artifact header.
		found: String,
	},
}
