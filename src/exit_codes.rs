//! Exit code constants for the projlock CLI and the bootstrap gate.
//!
//! - 0: Success
//! - 1: User error (bad args)
//! - 2: Validation failure (bad entry name or entry content)
//! - 3: I/O failure
//! - 4: Lock acquisition timed out
//! - 5: Lock usage error (double lock, release without lock)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad command line arguments.
pub const USER_ERROR: i32 = 1;

/// Validation failure: malformed entry name or entry content of the wrong shape.
pub const VALIDATION_FAILURE: i32 = 2;

/// I/O failure: permission denied, unreadable marker, or any other OS-level error.
pub const IO_FAILURE: i32 = 3;

/// Lock acquisition failure: wait budget exhausted.
pub const LOCK_TIMEOUT: i32 = 4;

/// Usage error: lock acquired twice or released without being acquired.
pub const USAGE_ERROR: i32 = 5;
