// avsync-cli/src/bin/debug_duration.rs
//
// Prints the container duration and the start time and duration of every
// stream of one media file, as reported by ffprobe.

use std::io;
use std::process::ExitCode;

use avsync_cli::{DurationCli, parse_args, run_duration};
use avsync_core::{FfprobeExecutor, logging};

fn main() -> ExitCode {
    let cli: DurationCli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    logging::init(cli.probe.verbose);

    let Some(file) = cli.file else {
        println!("Usage: debug_duration <video_file>");
        return ExitCode::FAILURE;
    };

    let config = match cli.probe.probe_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let probe = FfprobeExecutor::with_config(config);

    match run_duration(&file, &probe, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Probing {} failed: {}", file.display(), e);
            println!("Error running ffprobe: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
