//! Compiled grammar artifacts.
//!
//! A grammar artifact is the binary output of a grammar compiler: a small
//! fixed-layout header followed by an opaque parse table. This crate reads
//! and validates the header and keeps the bytes immutable afterwards.
//!
//! * [`header`]: binary layout, [`parse_header`] and its limits
//! * [`GrammarArtifact`]: validated, shareable artifact bytes
//! * [`ArtifactWriter`]: encoder used by compilers and test fixtures
//!
//! Version compatibility is not checked here; see `grammarkit-loader`.

mod artifact;
mod error;
pub mod header;
mod writer;

pub use artifact::GrammarArtifact;
pub use error::MalformedArtifact;
pub use header::{Header, MAGIC, MIN_HEADER_SIZE, parse_header, validate_name};
pub use writer::ArtifactWriter;
