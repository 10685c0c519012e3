// avsync-cli/src/bin/debug_audio_sync.rs
//
// Checks one or more media files for audio/video synchronisation problems:
// stream durations, start offsets and last packet timestamps.

use std::io;
use std::process::ExitCode;

use avsync_cli::{SyncCli, parse_args, run_sync};
use avsync_core::{FfprobeExecutor, logging};

fn main() -> ExitCode {
    let cli: SyncCli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    logging::init(cli.probe.verbose);

    if cli.files.is_empty() {
        println!("Usage: debug_audio_sync <video_file> [video_file2 ...]");
        println!("\nExample:");
        println!("  debug_audio_sync /tmp/recording_*.mp4");
        return ExitCode::FAILURE;
    }

    let settings = cli
        .probe
        .probe_config()
        .and_then(|config| cli.thresholds().map(|thresholds| (config, thresholds)));
    let (config, thresholds) = match settings {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Using thresholds {:?}", thresholds);

    let probe = FfprobeExecutor::with_config(config);
    match run_sync(&cli.files, &probe, &thresholds, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Could not write report: {}", e);
            ExitCode::FAILURE
        }
    }
}
