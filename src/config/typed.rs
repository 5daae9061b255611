//! Typed readers layered on raw entry reads.

use super::reader::ConfigReader;
use crate::error::{ProjlockError, Result};
use std::time::Duration;

impl ConfigReader {
    /// Read an entry as a single line of text.
    ///
    /// A missing entry reads as an empty string. Trailing blank lines are
    /// allowed; any other content after the first line is an error.
    pub fn read_line(&self, name: &str) -> Result<String> {
        let Some(content) = self.read_entry(name)? else {
            return Ok(String::new());
        };
        let text = String::from_utf8(content)
            .map_err(|_| ProjlockError::invalid_entry(name, "UTF-8 text"))?;

        match text.split_once('\n') {
            Some((first, rest)) if rest.trim().is_empty() => Ok(first.to_string()),
            Some(_) => Err(ProjlockError::invalid_entry(name, "a single line")),
            None => Ok(text),
        }
    }

    /// Read an entry as an integer. A missing or empty entry reads as 0.
    pub fn read_int(&self, name: &str) -> Result<i64> {
        let line = self.read_line(name)?;
        if line.is_empty() {
            return Ok(0);
        }
        line.trim()
            .parse()
            .map_err(|_| ProjlockError::invalid_entry(name, "integer"))
    }

    /// Read an integer entry that must lie within `[min, max]`.
    pub fn read_int_between(&self, name: &str, min: i64, max: i64) -> Result<i64> {
        let value = self.read_int(name)?;
        if value < min {
            return Err(ProjlockError::invalid_entry(
                name,
                format!("integer >= {} (found {})", min, value),
            ));
        }
        if value > max {
            return Err(ProjlockError::invalid_entry(
                name,
                format!("integer <= {} (found {})", max, value),
            ));
        }
        Ok(value)
    }

    /// Read an entry as a duration such as `3s`, `250ms` or `1h30m`.
    ///
    /// Unlike the other readers, a missing or empty entry is an error.
    pub fn read_duration(&self, name: &str) -> Result<Duration> {
        let line = self.read_line(name)?;
        humantime::parse_duration(line.trim())
            .map_err(|_| ProjlockError::invalid_entry(name, "duration"))
    }

    /// Read a duration entry that must lie within `[min, max]`.
    pub fn read_duration_between(
        &self,
        name: &str,
        min: Duration,
        max: Duration,
    ) -> Result<Duration> {
        let value = self.read_duration(name)?;
        if value < min {
            return Err(ProjlockError::invalid_entry(
                name,
                format!(
                    "duration >= {} (found {})",
                    humantime::format_duration(min),
                    humantime::format_duration(value)
                ),
            ));
        }
        if value > max {
            return Err(ProjlockError::invalid_entry(
                name,
                format!(
                    "duration <= {} (found {})",
                    humantime::format_duration(max),
                    humantime::format_duration(value)
                ),
            ));
        }
        Ok(value)
    }
}
