//! Security-patch level as a dispatch input.
//!
//! The patch string is parsed on demand and never cached; the threshold is a
//! plain (year, 0-based month) pair so the comparison stays a pure function.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, PatchDateError};

/// Format of `ro.build.version.security_patch`.
pub const SECURITY_PATCH_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityPatch {
	date: NaiveDate,
}

impl SecurityPatch {
	pub fn parse(input: &str) -> Result<Self, PatchDateError> {
		let trimmed = input.trim();
		if trimmed.is_empty() {
			return Err(PatchDateError::Missing);
		}
		NaiveDate::parse_from_str(trimmed, SECURITY_PATCH_FORMAT)
			.map(|date| Self { date })
			.map_err(|e| PatchDateError::Malformed { input: input.to_owned(), reason: e.to_string() })
	}

	/// `None` is treated the same as an empty string.
	pub fn from_reported(reported: Option<&str>) -> Result<Self, PatchDateError> {
		reported.map_or(Err(PatchDateError::Missing), Self::parse)
	}

	pub fn year(&self) -> i32 { self.date.year() }

	/// 0-based, January is 0.
	pub fn month0(&self) -> u32 { self.date.month0() }

	pub fn date(&self) -> NaiveDate { self.date }
}

/// Earliest patch level that needs the brokered path.
///
/// Text form is `YYYY-MM` with a 1-based month; in memory the month is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatchThreshold {
	pub year: i32,
	pub month0: u32,
}

impl PatchThreshold {
	/// October 2025.
	pub const DEFAULT: Self = Self { year: 2025, month0: 9 };

	pub const fn new(year: i32, month0: u32) -> Self { Self { year, month0 } }

	pub const fn is_met(&self, year: i32, month0: u32) -> bool {
		year > self.year || (year == self.year && month0 >= self.month0)
	}

	pub fn is_met_by(&self, patch: &SecurityPatch) -> bool { self.is_met(patch.year(), patch.month0()) }
}

impl Default for PatchThreshold {
	fn default() -> Self { Self::DEFAULT }
}

impl fmt::Display for PatchThreshold {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:04}-{:02}", self.year, self.month0 + 1) }
}

impl FromStr for PatchThreshold {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bad = || Error::config(format!("invalid patch threshold `{s}`, expected YYYY-MM"));
		let (y, m) = s.trim().split_once('-').ok_or_else(bad)?;
		let year: i32 = y.parse().map_err(|_| bad())?;
		let month: u32 = m.parse().map_err(|_| bad())?;
		if !(1..=12).contains(&month) {
			return Err(bad());
		}
		Ok(Self { year, month0: month - 1 })
	}
}

impl TryFrom<String> for PatchThreshold {
	type Error = Error;
	fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<PatchThreshold> for String {
	fn from(t: PatchThreshold) -> Self { t.to_string() }
}
