//! CLI argument parsing for projlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Projlock: cooperative locking for shared project directories.
///
/// Processes hold a shared lock on `.lock` in the project root while they
/// use project data. Maintenance tooling announces exclusive work by
/// creating `.lock.new`; new shared locks wait until it is gone.
#[derive(Parser, Debug)]
#[command(name = "projlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root directory (default: current directory).
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for projlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bootstrap gate once and report the outcome.
    ///
    /// Waits for a shared lock like a starting process would, then
    /// releases it. Exits non-zero if the lock could not be acquired
    /// unless graceful mode is on.
    Bootstrap(BootstrapArgs),

    /// Print a configuration entry.
    ///
    /// Reads `config/<NAME>` under a shared lock. A missing entry prints
    /// nothing.
    Get(GetArgs),

    /// Show the lock state of the project directory.
    Status(StatusArgs),
}

/// Arguments for the `bootstrap` command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Seconds to wait for the lock; 0 waits forever
    /// (default: $PROJLOCK_BOOTSTRAP_TIMEOUT or 15).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Continue without the lock instead of failing.
    #[arg(long)]
    pub graceful: bool,
}

/// How to interpret an entry for `get`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryFormat {
    /// Raw bytes, unchanged.
    #[default]
    Raw,
    /// A single line of text.
    Line,
    /// An integer.
    Int,
    /// A duration such as `3s` or `1h30m`.
    Duration,
}

/// Arguments for the `get` command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Entry name, e.g. `log/level`.
    pub name: String,

    /// Interpret the entry as this type.
    #[arg(long = "as", value_enum, default_value_t = EntryFormat::Raw)]
    pub format: EntryFormat,
}

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
