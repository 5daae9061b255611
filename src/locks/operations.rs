//! Shared lock acquisition and status reporting.

use super::guard::ProjectLock;
use super::types::{LockMode, LockStatus, TICK, Wait};
use crate::context::ProjectContext;
use crate::error::{ProjlockError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::thread;
use std::time::Instant;

/// Open the lock marker file, creating it if absent.
fn open_marker(path: &Path) -> Result<File> {
    match OpenOptions::new().read(true).open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let mut options = OpenOptions::new();
            options.read(true).write(true).create(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o644);
            }
            options.open(path).map_err(|e| {
                ProjlockError::io(format!("failed to create '{}'", path.display()), e)
            })
        }
        Err(e) => Err(ProjlockError::io(format!("failed to open '{}'", path.display()), e)),
    }
}

/// Whether a lock attempt failed only because another process holds the lock.
fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || (err.raw_os_error().is_some()
            && err.raw_os_error() == fs2::lock_contended_error().raw_os_error())
}

/// Acquire a shared lock on the project directory.
///
/// While the transition signal exists no lock attempt is made. Contention
/// with an exclusive holder is retried every [`TICK`]; every other failure
/// is returned immediately.
///
/// # Returns
///
/// * `Ok(ProjectLock)` - Lock granted (or locking disabled)
/// * `Err(ProjlockError::LockTimeout)` - `wait` elapsed without a grant
/// * `Err(ProjlockError::Io)` - Marker could not be opened or locked
pub fn acquire_shared(ctx: &ProjectContext, wait: Wait, mode: LockMode) -> Result<ProjectLock> {
    if mode == LockMode::Disabled {
        return Ok(ProjectLock::disabled(ctx.lock_path.clone()));
    }

    let file = open_marker(&ctx.lock_path)?;
    let started = Instant::now();

    loop {
        if ctx.transition_pending()? {
            tracing::trace!("exclusive operation pending, waiting");
        } else {
            match FileExt::try_lock_shared(&file) {
                Ok(()) => {
                    tracing::debug!(path = %ctx.lock_path.display(), "acquired shared lock");
                    return Ok(ProjectLock::held(ctx.lock_path.clone(), file));
                }
                Err(e) if is_contended(&e) => {
                    tracing::trace!("lock held exclusively elsewhere, waiting");
                }
                Err(e) => {
                    return Err(ProjlockError::io(
                        format!("failed to lock '{}'", ctx.lock_path.display()),
                        e,
                    ));
                }
            }
        }

        if let Wait::For(limit) = wait {
            let waited = started.elapsed();
            if waited >= limit {
                tracing::debug!(waited = ?waited, "shared lock wait timed out");
                return Err(ProjlockError::LockTimeout { waited });
            }
        }

        thread::sleep(TICK);
    }
}

/// Run `f` while holding a shared lock, releasing it on every exit path.
///
/// If both `f` and the release fail, the error from `f` is returned.
pub fn with_shared_lock<T, F>(ctx: &ProjectContext, wait: Wait, mode: LockMode, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let mut lock = acquire_shared(ctx, wait, mode)?;
    let result = f();
    let released = lock.release();

    match (result, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(release_err)) => {
            tracing::warn!(error = %release_err, "failed to release lock after error");
            Err(e)
        }
    }
}

/// Take and immediately drop a shared lock, reporting whether it was free.
fn shared_free_now(path: &Path) -> Result<bool> {
    let file = open_marker(path)?;
    match FileExt::try_lock_shared(&file) {
        Ok(()) => {
            FileExt::unlock(&file).map_err(|e| {
                ProjlockError::io(format!("failed to unlock '{}'", path.display()), e)
            })?;
            Ok(true)
        }
        Err(e) if is_contended(&e) => Ok(false),
        Err(e) => Err(ProjlockError::io(format!("failed to lock '{}'", path.display()), e)),
    }
}

/// Report the lock state of a project directory.
///
/// Checks for an immediately available shared lock by acquiring and
/// releasing one, which creates the marker if it is missing.
pub fn status(ctx: &ProjectContext, mode: LockMode) -> Result<LockStatus> {
    let marker_exists = ctx.lock_path.exists();
    let transition_pending = ctx.transition_pending()?;

    let shared_available = match mode {
        LockMode::Disabled => true,
        LockMode::Enabled if transition_pending => false,
        LockMode::Enabled => shared_free_now(&ctx.lock_path)?,
    };

    Ok(LockStatus {
        lock_path: ctx.lock_path.clone(),
        marker_exists,
        transition_pending,
        shared_available,
        mode,
    })
}
