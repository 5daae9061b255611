//! The project lock handle.

use super::types::LockMode;
use crate::error::{ProjlockError, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum State {
    Held(File),
    Disabled,
    Released,
}

/// This process's hold on the shared project lock.
///
/// Must be released with [`ProjectLock::release`]. If a held lock is
/// dropped instead, a warning is logged and the OS releases the advisory
/// lock when the handle closes.
#[derive(Debug)]
pub struct ProjectLock {
    /// Path to the lock marker file.
    path: PathBuf,

    state: State,
}

impl ProjectLock {
    pub(super) fn held(path: PathBuf, file: File) -> Self {
        Self {
            path,
            state: State::Held(file),
        }
    }

    pub(super) fn disabled(path: PathBuf) -> Self {
        Self {
            path,
            state: State::Disabled,
        }
    }

    /// Get the path to the lock marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this value currently holds an OS advisory lock.
    pub fn is_held(&self) -> bool {
        matches!(self.state, State::Held(_))
    }

    /// The mode the lock was acquired in.
    pub fn mode(&self) -> LockMode {
        match self.state {
            State::Disabled => LockMode::Disabled,
            State::Held(_) | State::Released => LockMode::Enabled,
        }
    }

    /// Release the lock and close the marker handle.
    ///
    /// Releasing twice is an error. With locking disabled this is always a
    /// no-op success.
    pub fn release(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Held(file) => {
                let unlocked = FileExt::unlock(&file);
                drop(file);
                match unlocked {
                    Ok(()) => {
                        tracing::debug!(path = %self.path.display(), "released shared lock");
                        Ok(())
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %self.path.display(),
                            error = %e,
                            "failed to release shared lock"
                        );
                        Err(ProjlockError::io(
                            format!("failed to unlock '{}'", self.path.display()),
                            e,
                        ))
                    }
                }
            }
            State::Disabled => {
                self.state = State::Disabled;
                Ok(())
            }
            State::Released => Err(ProjlockError::NotAcquired(format!(
                "project lock '{}'",
                self.path.display()
            ))),
        }
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        if self.is_held() {
            tracing::warn!(
                path = %self.path.display(),
                "project lock dropped without release"
            );
        }
    }
}
