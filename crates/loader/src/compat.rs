//! Supported format-version window.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

/// A range whose lower bound exceeds its upper bound.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid compatibility range: min {min} > max {max}")]
pub struct RangeError {
	pub min: u32,
	pub max: u32,
}

/// Inclusive span of artifact format versions a runtime agrees to load.
///
/// Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompatibilityRange {
	min: u32,
	max: u32,
}

impl CompatibilityRange {
	/// Versions accepted by the bundled parsing runtime.
	pub const RUNTIME: Self = Self {
		min: Self::MIN_COMPATIBLE_VERSION,
		max: Self::CURRENT_VERSION,
	};

	/// Oldest layout revision the runtime still reads.
	pub const MIN_COMPATIBLE_VERSION: u32 = 13;

	/// Layout revision the runtime writes.
	pub const CURRENT_VERSION: u32 = 15;

	pub fn new(min: u32, max: u32) -> Result<Self, RangeError> {
		if min > max {
			return Err(RangeError { min, max });
		}
		Ok(Self { min, max })
	}

	/// A range accepting exactly one version.
	pub const fn exact(version: u32) -> Self {
		Self { min: version, max: version }
	}

	pub const fn min(self) -> u32 {
		self.min
	}

	pub const fn max(self) -> u32 {
		self.max
	}

	pub const fn contains(self, version: u32) -> bool {
		self.min <= version && version <= self.max
	}
}

impl Default for CompatibilityRange {
	fn default() -> Self {
		Self::RUNTIME
	}
}

impl fmt::Display for CompatibilityRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}]", self.min, self.max)
	}
}

impl TryFrom<RangeInclusive<u32>> for CompatibilityRange {
	type Error = RangeError;

	fn try_from(range: RangeInclusive<u32>) -> Result<Self, Self::Error> {
		Self::new(*range.start(), *range.end())
	}
}

impl From<CompatibilityRange> for RangeInclusive<u32> {
	fn from(range: CompatibilityRange) -> Self {
		range.min..=range.max
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_runtime_range() {
		let range = CompatibilityRange::RUNTIME;
		assert_eq!((range.min(), range.max()), (13, 15));
		assert_eq!(CompatibilityRange::default(), range);
	}

	#[test]
	fn test_rejects_inverted_bounds() {
		assert_eq!(CompatibilityRange::new(15, 13), Err(RangeError { min: 15, max: 13 }));
		assert!(CompatibilityRange::try_from(9..=13).is_ok());
	}

	#[rstest]
	#[case(12, false)]
	#[case(13, true)]
	#[case(14, true)]
	#[case(15, true)]
	#[case(16, false)]
	fn test_contains_is_inclusive(#[case] version: u32, #[case] expected: bool) {
		assert_eq!(CompatibilityRange::RUNTIME.contains(version), expected);
	}

	#[test]
	fn test_exact() {
		let range = CompatibilityRange::exact(14);
		assert!(range.contains(14));
		assert!(!range.contains(13));
		assert_eq!(range.to_string(), "[14, 14]");
	}
}
