//! Centralized logging configuration for avsync
//!
//! This module handles:
//! - Setting up console logging on stderr with a compact colored format
//! - Choosing the level from the CLI's verbosity flag
//! - Logging the external commands that are executed
//!
//! Reports are printed on stdout by the tools themselves; log records go to
//! stderr so the two never interleave in a redirected report.

use log::{debug, LevelFilter};
use std::io::Write;
use std::process::Command;
use colored::*;

/// Initialize the logger for avsync
///
/// Verbose runs log at debug level. Otherwise only warnings and errors are
/// shown so that the printed reports stay readable.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    init_with_level(level);
}

/// Initialize the logger with a specific log level
///
/// Uses `try_init` so calling it twice (e.g. from tests) is harmless.
pub fn init_with_level(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            let level_colored = match record.level() {
                log::Level::Error => "ERROR".bright_red(),
                log::Level::Warn => "WARN ".yellow(),
                log::Level::Info => "INFO ".green(),
                log::Level::Debug => "DEBUG".blue(),
                log::Level::Trace => "TRACE".magenta(),
            };

            writeln!(
                buf,
                "{} {} {}",
                timestamp.to_string().white(),
                level_colored,
                record.args()
            )
        })
        .filter(None, level)
        .target(env_logger::Target::Stderr)
        .try_init();

    if result.is_ok() {
        debug!("Logger initialized with level: {}", level);
    }
}

/// Render a command line the way it would be typed
pub fn format_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy()).collect();

    if args.is_empty() {
        program.into_owned()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Log a command being executed
pub fn log_command(cmd: &Command) {
    debug!("Executing command: {}", format_command(cmd).cyan());
}
