//! Locked reads of raw configuration entries.

use super::name::EntryName;
use crate::context::ProjectContext;
use crate::error::{ProjlockError, Result};
use crate::locks::{self, LockMode, Wait};
use crate::settings::Settings;
use std::collections::HashMap;
use std::fs;
use std::io;

/// Reads entries under a project's `config/` directory.
///
/// Entries are never cached: every read reopens the file under a freshly
/// acquired shared lock.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    ctx: ProjectContext,
    mode: LockMode,

    /// In-memory contents that shadow entry files of the same name.
    overrides: HashMap<String, Vec<u8>>,
}

impl ConfigReader {
    /// Create a reader for a project.
    pub fn new(ctx: ProjectContext, mode: LockMode) -> Self {
        Self {
            ctx,
            mode,
            overrides: HashMap::new(),
        }
    }

    /// Create a reader for the current directory using process settings.
    pub fn from_env() -> Result<Self> {
        let ctx = ProjectContext::resolve()?;
        Ok(Self::new(ctx, Settings::from_env().lock_mode))
    }

    /// Serve `content` for `name` instead of reading the entry file.
    ///
    /// Names without an override keep reading from disk.
    pub fn with_override(mut self, name: &str, content: impl Into<Vec<u8>>) -> Result<Self> {
        let name = EntryName::parse(name)?;
        self.overrides.insert(name.to_string(), content.into());
        Ok(self)
    }

    /// The project this reader reads from.
    pub fn context(&self) -> &ProjectContext {
        &self.ctx
    }

    /// Read the raw contents of an entry.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` - Entry contents
    /// * `Ok(None)` - Entry file does not exist
    /// * `Err(ProjlockError::InvalidEntryName)` - Malformed name, nothing was read
    /// * `Err(ProjlockError::Io)` - Entry exists but cannot be read
    pub fn read_entry(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let name = EntryName::parse(name)?;

        if let Some(content) = self.overrides.get(name.as_str()) {
            return Ok(Some(content.clone()));
        }

        let path = self.ctx.entry_path(name.as_str());
        locks::with_shared_lock(&self.ctx, Wait::Forever, self.mode, || {
            match fs::read(&path) {
                Ok(content) => Ok(Some(content)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(ProjlockError::io(
                    format!("read {}/{}", crate::context::CONFIG_DIR, name),
                    e,
                )),
            }
        })
    }
}
