//! Configuration entry name validation.

use crate::error::{ProjlockError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Slash-separated segments of word characters, dots and hyphens.
static ENTRY_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_.-]+/)*[A-Za-z0-9_.-]+$").expect("Invalid entry name regex")
});

/// A validated configuration entry name such as `log/level`.
///
/// Always relative, never empty, and free of `.` and `..` segments, so it
/// cannot escape the configuration root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryName(String);

impl EntryName {
    /// Validate a raw entry name.
    pub fn parse(name: &str) -> Result<Self> {
        let has_dot_segment = name.split('/').any(|seg| seg == "." || seg == "..");
        if has_dot_segment || !ENTRY_NAME_REGEX.is_match(name) {
            return Err(ProjlockError::InvalidEntryName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
