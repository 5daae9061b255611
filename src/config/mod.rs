//! Configuration entries for projlock.
//!
//! A project keeps its configuration as one small file per entry under
//! `config/`, addressed by slash-separated names such as `log/level`.
//! Every read takes a short-held shared lock so an entry is never observed
//! halfway through an exclusive update. A missing entry is not an error.

mod name;
mod reader;
mod typed;


// Re-export public API
pub use name::EntryName;
pub use reader::ConfigReader;
