//! Startup gate for processes sharing a project directory.
//!
//! A process runs the gate once, before any other project-aware work. The
//! gate takes a shared lock with the configured timeout, which staggers
//! launches that race an exclusive maintenance operation. On failure the
//! process either terminates (default) or continues without a lock when
//! the graceful flag is set.
//!
//! [`BootstrapGate`] is the explicit handle. The free functions [`lock`],
//! [`unlock`], [`has_lock`] and [`run_or_exit`] drive one process-wide gate
//! bound to the current working directory.

use crate::context::ProjectContext;
use crate::error::{ProjlockError, Result};
use crate::locks::{self, LockMode, ProjectLock, Wait};
use crate::settings::Settings;
use std::sync::{Mutex, MutexGuard};

const LOCK_NAME: &str = "bootstrap lock";

static GATE: Mutex<BootstrapGate> = Mutex::new(BootstrapGate::new());

/// Result of running the gate.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// The bootstrap lock is held.
    Locked,
    /// Acquisition failed but graceful mode let the process continue.
    Proceeding {
        /// Why the lock was not acquired.
        cause: ProjlockError,
    },
}

/// Two-state machine {Unlocked, Locked} over at most one project lock.
#[derive(Debug, Default)]
pub struct BootstrapGate {
    lock: Option<ProjectLock>,
}

impl BootstrapGate {
    /// Create an unlocked gate.
    pub const fn new() -> Self {
        Self { lock: None }
    }

    /// Acquire the bootstrap lock.
    ///
    /// Fails with `AlreadyAcquired` while locked. A failed acquisition
    /// leaves the gate unlocked.
    pub fn lock(&mut self, ctx: &ProjectContext, wait: Wait, mode: LockMode) -> Result<()> {
        if self.lock.is_some() {
            return Err(ProjlockError::AlreadyAcquired(LOCK_NAME.to_string()));
        }
        self.lock = Some(locks::acquire_shared(ctx, wait, mode)?);
        Ok(())
    }

    /// Release the bootstrap lock.
    ///
    /// Fails with `NotAcquired` while unlocked. The gate is unlocked
    /// afterwards even if releasing the OS lock failed.
    pub fn unlock(&mut self) -> Result<()> {
        match self.lock.take() {
            Some(mut lock) => lock.release(),
            None => Err(ProjlockError::NotAcquired(LOCK_NAME.to_string())),
        }
    }

    /// Whether the bootstrap lock is currently held.
    pub fn has_lock(&self) -> bool {
        self.lock.is_some()
    }

    /// Run the gate with process settings.
    ///
    /// # Returns
    ///
    /// * `Ok(BootstrapOutcome::Locked)` - Lock acquired
    /// * `Ok(BootstrapOutcome::Proceeding)` - Failed, but graceful mode is on
    /// * `Err(_)` - Failed with graceful mode off
    pub fn run(&mut self, ctx: &ProjectContext, settings: &Settings) -> Result<BootstrapOutcome> {
        match self.lock(ctx, settings.bootstrap_timeout, settings.lock_mode) {
            Ok(()) => Ok(BootstrapOutcome::Locked),
            Err(cause) if settings.bootstrap_graceful => {
                tracing::warn!(error = %cause, "continuing without bootstrap lock");
                Ok(BootstrapOutcome::Proceeding { cause })
            }
            Err(cause) => Err(cause),
        }
    }
}

fn global() -> MutexGuard<'static, BootstrapGate> {
    GATE.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Acquire the process-wide bootstrap lock for the current directory.
pub fn lock(wait: Wait) -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    let mode = Settings::from_env().lock_mode;
    global().lock(&ctx, wait, mode)
}

/// Release the process-wide bootstrap lock.
pub fn unlock() -> Result<()> {
    global().unlock()
}

/// Whether the process-wide bootstrap lock is held.
pub fn has_lock() -> bool {
    global().has_lock()
}

/// Run the process-wide gate against the current directory.
pub fn run(settings: &Settings) -> Result<BootstrapOutcome> {
    let ctx = match ProjectContext::resolve() {
        Ok(ctx) => ctx,
        Err(cause) if settings.bootstrap_graceful => {
            tracing::warn!(error = %cause, "continuing without bootstrap lock");
            return Ok(BootstrapOutcome::Proceeding { cause });
        }
        Err(cause) => return Err(cause),
    };
    global().run(&ctx, settings)
}

/// Process startup entry point.
///
/// Runs the process-wide gate with `settings`, normally
/// [`Settings::from_env`]. On a fatal failure, reports the cause and exits
/// with its exit code.
pub fn run_or_exit(settings: &Settings) -> BootstrapOutcome {
    match run(settings) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "can't get bootstrap lock");
            eprintln!("can't get bootstrap lock: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}
