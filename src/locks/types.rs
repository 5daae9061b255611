//! Lock mode, wait budget, and status structures.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Poll interval while waiting for the lock.
pub const TICK: Duration = Duration::from_millis(100);

/// Whether the lock protocol is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// Normal operation: acquire and release real advisory locks.
    #[default]
    Enabled,
    /// Locking is skipped (sandboxed or test execution).
    Disabled,
}

/// How long an acquisition may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Wait until the lock is granted.
    Forever,
    /// Give up with a timeout error after this long.
    For(Duration),
}

impl From<Duration> for Wait {
    /// A zero duration means wait forever.
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Wait::Forever
        } else {
            Wait::For(duration)
        }
    }
}

impl std::fmt::Display for Wait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wait::Forever => write!(f, "forever"),
            Wait::For(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}

/// Snapshot of the lock state of a project directory.
#[derive(Debug, Clone, Serialize)]
pub struct LockStatus {
    /// The lock marker path.
    pub lock_path: PathBuf,

    /// Whether the lock marker exists.
    pub marker_exists: bool,

    /// Whether the transition signal is present.
    pub transition_pending: bool,

    /// Whether a shared lock could be taken without waiting.
    pub shared_available: bool,

    /// The lock mode in effect.
    pub mode: LockMode,
}

impl std::fmt::Display for LockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Lock file:          {}", self.lock_path.display())?;
        writeln!(f, "Marker exists:      {}", yes_no(self.marker_exists))?;
        writeln!(f, "Exclusive pending:  {}", yes_no(self.transition_pending))?;
        writeln!(f, "Shared available:   {}", yes_no(self.shared_available))?;
        write!(
            f,
            "Locking:            {}",
            match self.mode {
                LockMode::Enabled => "enabled",
                LockMode::Disabled => "disabled",
            }
        )
    }
}
