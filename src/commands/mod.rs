//! Command implementations for projlock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

use crate::cli::{BootstrapArgs, Cli, Command, EntryFormat, GetArgs, StatusArgs};
use projlock::bootstrap::{self, BootstrapOutcome};
use projlock::config::ConfigReader;
use projlock::context::ProjectContext;
use projlock::error::{ProjlockError, Result};
use projlock::locks::{self, Wait};
use projlock::settings::Settings;
use std::env;
use std::io::{self, Write};
use std::time::Duration;

/// Dispatch a command to its implementation.
///
/// `-C` changes the working directory first, so the process-wide bootstrap
/// gate and every other command see the same project root.
pub fn dispatch(cli: Cli) -> Result<()> {
    if let Some(root) = &cli.project {
        env::set_current_dir(root).map_err(|e| {
            ProjlockError::io(
                format!("failed to enter project directory '{}'", root.display()),
                e,
            )
        })?;
    }
    let ctx = ProjectContext::resolve()?;
    let settings = Settings::from_env();
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Bootstrap(args) => cmd_bootstrap(&ctx, settings, &args, &mut out),
        Command::Get(args) => cmd_get(&ctx, &settings, &args, &mut out),
        Command::Status(args) => cmd_status(&ctx, &settings, &args, &mut out),
    }
}

fn stdout_error(e: io::Error) -> ProjlockError {
    ProjlockError::io("failed to write to stdout", e)
}

/// Apply `bootstrap` flags on top of the environment settings.
fn bootstrap_settings(mut settings: Settings, args: &BootstrapArgs) -> Result<Settings> {
    if let Some(secs) = args.timeout {
        let timeout = Duration::try_from_secs_f64(secs).map_err(|_| {
            ProjlockError::UserError(format!(
                "--timeout must be a non-negative number of seconds, got {}",
                secs
            ))
        })?;
        settings.bootstrap_timeout = Wait::from(timeout);
    }
    settings.bootstrap_graceful |= args.graceful;
    Ok(settings)
}

/// Run the process-wide gate the way a starting process does.
///
/// `ctx` must be the current directory's project. A fatal failure exits
/// from inside [`bootstrap::run_or_exit`].
fn cmd_bootstrap(
    ctx: &ProjectContext,
    settings: Settings,
    args: &BootstrapArgs,
    out: &mut impl Write,
) -> Result<()> {
    let settings = bootstrap_settings(settings, args)?;

    match bootstrap::run_or_exit(&settings) {
        BootstrapOutcome::Locked => {
            writeln!(
                out,
                "Bootstrap lock acquired: {} (waited up to {})",
                ctx.lock_path.display(),
                settings.bootstrap_timeout
            )
            .map_err(stdout_error)?;
            bootstrap::unlock()
        }
        BootstrapOutcome::Proceeding { cause } => {
            writeln!(out, "Continuing without bootstrap lock: {}", cause).map_err(stdout_error)
        }
    }
}

fn cmd_get(
    ctx: &ProjectContext,
    settings: &Settings,
    args: &GetArgs,
    out: &mut impl Write,
) -> Result<()> {
    let reader = ConfigReader::new(ctx.clone(), settings.lock_mode);

    match args.format {
        EntryFormat::Raw => {
            if let Some(content) = reader.read_entry(&args.name)? {
                out.write_all(&content).map_err(stdout_error)?;
            }
            Ok(())
        }
        EntryFormat::Line => {
            let line = reader.read_line(&args.name)?;
            writeln!(out, "{}", line).map_err(stdout_error)
        }
        EntryFormat::Int => {
            let value = reader.read_int(&args.name)?;
            writeln!(out, "{}", value).map_err(stdout_error)
        }
        EntryFormat::Duration => {
            let value = reader.read_duration(&args.name)?;
            writeln!(out, "{}", humantime::format_duration(value)).map_err(stdout_error)
        }
    }
}

fn cmd_status(
    ctx: &ProjectContext,
    settings: &Settings,
    args: &StatusArgs,
    out: &mut impl Write,
) -> Result<()> {
    let status = locks::status(ctx, settings.lock_mode)?;

    if args.json {
        let json = serde_json::to_string_pretty(&status).map_err(|e| {
            ProjlockError::UserError(format!("failed to serialize status to JSON: {}", e))
        })?;
        writeln!(out, "{}", json).map_err(stdout_error)?;
    } else {
        writeln!(out, "{}", status).map_err(stdout_error)?;
    }

    Ok(())
}
