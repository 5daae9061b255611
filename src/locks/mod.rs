//! Locking subsystem for projlock.
//!
//! Processes sharing a project directory cooperate through two files in
//! the project root:
//! - `.lock`: the marker file. Readers hold a *shared* advisory lock (flock)
//!   on it for as long as they use project data.
//! - `.lock.new`: the transition signal. External maintenance tooling
//!   creates it before taking an *exclusive* lock on the marker and removes
//!   it when done. While it exists, no new shared lock is granted.
//!
//! Acquisition polls every [`TICK`] until it sees no signal and gets the
//! shared lock, or until the wait budget runs out. Only contention with an
//! exclusive holder is retried. Every other failure is returned at once.

mod guard;
mod operations;
mod types;


// Re-export public API
pub use guard::ProjectLock;
pub use operations::{acquire_shared, status, with_shared_lock};
pub use types::{LockMode, LockStatus, TICK, Wait};
