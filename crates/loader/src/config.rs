//! Loader configuration from a KDL manifest.
//!
//! # KDL Format
//!
//! ```kdl
//! // Accepted format versions (both bounds inclusive)
//! compat min=13 max=15
//!
//! // Extra directories searched before the defaults
//! search-path "/opt/grammars"
//!
//! // Explicit artifact locations, relative to the manifest
//! grammar pluto path="pluto.grammar"
//! ```

use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlNode};
use thiserror::Error;
use tracing::warn;

use crate::compat::{CompatibilityRange, RangeError};
use crate::paths::{grammar_search_paths, normalize_grammar_name};

/// Errors that can occur when reading a manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// KDL syntax error.
	#[error("failed to parse KDL: {0}")]
	Kdl(#[from] kdl::KdlError),

	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the manifest that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A required argument or property is missing.
	#[error("missing required field: {0}")]
	MissingField(String),

	/// A value has the wrong type or does not fit.
	#[error("invalid value for {field}: {value}")]
	InvalidValue { field: String, value: String },

	#[error(transparent)]
	Range(#[from] RangeError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A grammar declared in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarEntry {
	pub name: String,
	pub path: PathBuf,
}

/// Everything a [`GrammarLoader`](crate::GrammarLoader) needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Accepted artifact format versions.
	pub compat: CompatibilityRange,
	/// Directories searched, in order, for `<name>.grammar`.
	pub search_paths: Vec<PathBuf>,
	/// Grammars with explicit locations. These win over search paths.
	pub grammars: Vec<GrammarEntry>,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			compat: CompatibilityRange::RUNTIME,
			search_paths: grammar_search_paths(),
			grammars: Vec::new(),
		}
	}
}

impl LoaderConfig {
	/// A configuration with no search paths and no manifest entries.
	pub fn empty(compat: CompatibilityRange) -> Self {
		Self {
			compat,
			search_paths: Vec::new(),
			grammars: Vec::new(),
		}
	}

	/// Replaces the accepted version range.
	pub fn with_compat(mut self, compat: CompatibilityRange) -> Self {
		self.compat = compat;
		self
	}

	/// Appends a directory to the search order.
	pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
		self.search_paths.push(dir.into());
		self
	}

	/// Declares an explicit artifact location for `name`.
	pub fn with_grammar(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		self.grammars.push(GrammarEntry {
			name: name.into(),
			path: path.into(),
		});
		self
	}

	/// Looks up a manifest entry by grammar name, treating `-` and `_` as equal.
	pub fn grammar(&self, name: &str) -> Option<&GrammarEntry> {
		let name = normalize_grammar_name(name);
		self.grammars.iter().find(|g| normalize_grammar_name(&g.name) == name)
	}

	/// Parses a manifest on top of [`LoaderConfig::default`].
	///
	/// Relative paths are kept as written.
	pub fn parse_kdl(input: &str) -> Result<Self> {
		Self::default().merge_kdl(input, None)
	}

	/// Reads a manifest file on top of [`LoaderConfig::default`].
	///
	/// Relative paths resolve against the manifest's directory.
	pub fn load_file(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::default().merge_kdl(&input, path.parent())
	}

	/// Applies a manifest to this configuration.
	///
	/// `compat` replaces the current range, `search-path` entries are tried
	/// before existing paths and `grammar` entries are appended.
	pub fn merge_kdl(mut self, input: &str, base: Option<&Path>) -> Result<Self> {
		let doc: KdlDocument = input.parse()?;
		let resolve = |p: PathBuf| match base {
			Some(base) if p.is_relative() => base.join(p),
			_ => p,
		};

		let mut search_paths = Vec::new();
		for node in doc.nodes() {
			match node.name().value() {
				"compat" => {
					let min = u32_prop(node, "min")?;
					let max = u32_prop(node, "max")?;
					self.compat = CompatibilityRange::new(min, max)?;
				}
				"search-path" => search_paths.push(resolve(PathBuf::from(string_arg(node, "search-path")?))),
				"grammar" => {
					let name = string_arg(node, "grammar")?.to_owned();
					let path = node
						.entry("path")
						.ok_or_else(|| ConfigError::MissingField(format!("grammar {name}: path")))?;
					let path = path.value().as_string().ok_or_else(|| ConfigError::InvalidValue {
						field: format!("grammar {name}: path"),
						value: path.value().to_string(),
					})?;
					self.grammars.push(GrammarEntry {
						name,
						path: resolve(PathBuf::from(path)),
					});
				}
				other => warn!(node = other, "Ignoring unknown manifest node"),
			}
		}

		search_paths.append(&mut self.search_paths);
		self.search_paths = search_paths;
		Ok(self)
	}
}

fn string_arg<'a>(node: &'a KdlNode, field: &str) -> Result<&'a str> {
	let entry = node.entry(0).ok_or_else(|| ConfigError::MissingField(field.to_owned()))?;
	entry.value().as_string().ok_or_else(|| ConfigError::InvalidValue {
		field: field.to_owned(),
		value: entry.value().to_string(),
	})
}

fn u32_prop(node: &KdlNode, key: &str) -> Result<u32> {
	let field = format!("{}.{key}", node.name().value());
	let entry = node.entry(key).ok_or_else(|| ConfigError::MissingField(field.clone()))?;
	entry
		.value()
		.as_integer()
		.and_then(|v| u32::try_from(v).ok())
		.ok_or_else(|| ConfigError::InvalidValue {
			field,
			value: entry.value().to_string(),
		})
}
