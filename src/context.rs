//! Project directory resolution for projlock.
//!
//! Every cooperating process must agree on the marker paths, so they are
//! fixed relative to the project root. By default the root is the current
//! working directory of the process.

use crate::error::{ProjlockError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Lock marker file name relative to the project root.
pub const LOCK_FILE: &str = ".lock";

/// Transition signal file name relative to the project root.
pub const TRANSITION_SIGNAL_FILE: &str = ".lock.new";

/// Configuration root directory relative to the project root.
pub const CONFIG_DIR: &str = "config";

/// Resolved paths for one project directory.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Project root directory.
    pub root: PathBuf,

    /// Lock marker file (`{root}/.lock`).
    pub lock_path: PathBuf,

    /// Transition signal file (`{root}/.lock.new`).
    pub signal_path: PathBuf,

    /// Configuration root (`{root}/config/`).
    pub config_dir: PathBuf,
}

impl ProjectContext {
    /// Resolve the project context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir()
            .map_err(|e| ProjlockError::io("failed to get current working directory", e))?;

        Ok(Self::resolve_from(cwd))
    }

    /// Resolve the project context for an explicit root directory.
    pub fn resolve_from<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();

        Self {
            lock_path: root.join(LOCK_FILE),
            signal_path: root.join(TRANSITION_SIGNAL_FILE),
            config_dir: root.join(CONFIG_DIR),
            root,
        }
    }

    /// Path of a configuration entry. The name must already be validated.
    pub(crate) fn entry_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    /// Whether the transition signal is currently present.
    pub fn transition_pending(&self) -> Result<bool> {
        self.signal_path.try_exists().map_err(|e| {
            ProjlockError::io(
                format!("failed to check '{}'", self.signal_path.display()),
                e,
            )
        })
    }
}
