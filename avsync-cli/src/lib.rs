// avsync-cli/src/lib.rs
//
// Library portion of the avsync command-line tools.
// Contains argument definitions and command logic shared by both binaries.

pub mod cli;
pub mod commands;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

// Re-export items needed by the binaries or integration tests
pub use cli::{DurationCli, ProbeArgs, SyncCli};
pub use commands::duration::run_duration;
pub use commands::sync::run_sync;

/// Parse the command line, or say why it could not be parsed.
///
/// `--help` and `--version` exit 0; any other argument error exits 1, the
/// same code used for a missing input file.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|e| {
        // printing only fails when the terminal is gone
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    })
}
