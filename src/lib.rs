//! Projlock: cooperative file-based locking for shared project directories.
//!
//! Independently started processes of one deployment share a project
//! directory. They coordinate through a shared advisory lock on `.lock`
//! and a transition signal file `.lock.new` that announces exclusive
//! maintenance work:
//!
//! - [`locks`]: shared lock acquisition with a bounded, signal-aware wait
//! - [`bootstrap`]: the startup gate every process runs once
//! - [`config`]: configuration entry reads wrapped in a short shared lock

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod logging;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use error::{ErrorClass, ProjlockError, Result};
