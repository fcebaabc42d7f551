// Loader failures are reported through tracing and typed errors, never stderr
#![deny(clippy::print_stderr)]

//! Compatibility-checked grammar loading.
//!
//! Turns a compiled grammar artifact into a [`LoaderHandle`] a parsing engine
//! can consume, after checking the artifact's format version against the
//! [`CompatibilityRange`] the runtime supports.
//!
//! # Architecture
//!
//! * [`load()`] / [`reload()`]: the stateless, all-or-nothing load transaction
//! * [`GrammarLoader`]: name resolution through manifest entries and search paths
//! * [`GrammarRegistry`]: handles cached by grammar name
//! * [`config`]: `grammars.kdl` manifest parsing
//! * [`paths`]: default artifact search directories
//!
//! Every failure is one of three [`LoadErrorKind`]s and names its source.

mod compat;
pub mod config;
mod error;
mod load;
mod loader;
pub mod paths;
mod registry;
mod source;

pub use compat::{CompatibilityRange, RangeError};
pub use config::{ConfigError, GrammarEntry, LoaderConfig};
pub use error::{LoadError, LoadErrorKind};
pub use grammarkit_artifact::{GrammarArtifact, Header, MalformedArtifact};
pub use load::{LoaderHandle, load, reload};
pub use loader::GrammarLoader;
pub use paths::{grammar_file_name, grammar_search_paths};
pub use registry::GrammarRegistry;
pub use source::{GrammarSource, SourceId};
