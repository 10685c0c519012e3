// avsync-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use std::path::PathBuf;
use std::time::Duration;

use avsync_core::config::DEFAULT_FFPROBE;
use avsync_core::{AvSyncError, ProbeConfig, Result, SyncThresholds};
use clap::{Args, Parser};

// --- Shared Options ---

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Path to the ffprobe binary
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FFPROBE)]
    pub ffprobe: PathBuf,

    /// Kill ffprobe if a single call takes longer than this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Log debug information (including ffprobe command lines) to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProbeArgs {
    /// Builds and validates the probe configuration
    pub fn probe_config(&self) -> Result<ProbeConfig> {
        let timeout = match self.timeout {
            Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|_| {
                AvSyncError::Config(format!(
                    "timeout must be a positive number of seconds, got {}",
                    secs
                ))
            })?),
            None => None,
        };

        let config = ProbeConfig::default()
            .with_ffprobe(&self.ffprobe)
            .with_timeout(timeout);
        config.validate()?;
        Ok(config)
    }
}

// --- debug_duration ---

#[derive(Parser, Debug)]
#[command(
    name = "debug_duration",
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Print the container and per-stream durations of a media file"
)]
pub struct DurationCli {
    /// Media file to inspect
    #[arg(value_name = "VIDEO_FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

// --- debug_audio_sync ---

#[derive(Parser, Debug)]
#[command(
    name = "debug_audio_sync",
    version,
    about = "Check media files for audio/video synchronisation problems",
    long_about = "Compares stream durations, start times and last packet timestamps \
                  of the first video and first audio stream of each file."
)]
pub struct SyncCli {
    /// Media files to analyse, in order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub probe: ProbeArgs,

    // --- Threshold Overrides (seconds) ---
    /// Duration difference above which a WARNING is reported
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub duration_warning: Option<f64>,

    /// Duration difference above which a NOTICE is reported
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub duration_notice: Option<f64>,

    /// Start time difference above which the offset is reported
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub start_offset: Option<f64>,

    /// Last packet difference above which a WARNING is reported
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub packet_warning: Option<f64>,
}

impl SyncCli {
    /// Defaults overridden by the command line, validated
    pub fn thresholds(&self) -> Result<SyncThresholds> {
        let defaults = SyncThresholds::default();
        let thresholds = SyncThresholds {
            duration_warning: self.duration_warning.unwrap_or(defaults.duration_warning),
            duration_notice: self.duration_notice.unwrap_or(defaults.duration_notice),
            start_offset: self.start_offset.unwrap_or(defaults.start_offset),
            packet_warning: self.packet_warning.unwrap_or(defaults.packet_warning),
        };
        thresholds.validate()?;
        Ok(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_cli_defaults() {
        let cli = DurationCli::try_parse_from(["debug_duration", "clip.mp4"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("clip.mp4")));
        assert!(!cli.probe.verbose);

        let config = cli.probe.probe_config().unwrap();
        assert_eq!(config, ProbeConfig::default());

        let cli = DurationCli::try_parse_from(["debug_duration"]).unwrap();
        assert_eq!(cli.file, None);
    }

    #[test]
    fn test_probe_options() {
        let cli = DurationCli::try_parse_from([
            "debug_duration",
            "--ffprobe",
            "/opt/ffmpeg/bin/ffprobe",
            "--timeout",
            "2.5",
            "-v",
            "clip.mp4",
        ])
        .unwrap();
        assert!(cli.probe.verbose);

        let config = cli.probe.probe_config().unwrap();
        assert_eq!(config.ffprobe_path, PathBuf::from("/opt/ffmpeg/bin/ffprobe"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_invalid_timeouts() {
        for bad in ["0", "-1"] {
            let cli = DurationCli::try_parse_from(["debug_duration", "--timeout", bad, "x.mp4"]);
            // "-1" may be rejected by clap itself; either way it never becomes a config
            if let Ok(cli) = cli {
                assert!(matches!(cli.probe.probe_config(), Err(AvSyncError::Config(_))));
            }
        }
    }

    #[test]
    fn test_sync_cli_files_and_thresholds() {
        let cli = SyncCli::try_parse_from(["debug_audio_sync", "a.mp4", "b.mp4"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")]);
        assert_eq!(cli.thresholds().unwrap(), SyncThresholds::default());

        let cli = SyncCli::try_parse_from([
            "debug_audio_sync",
            "--duration-warning",
            "1.0",
            "--packet-warning",
            "0.25",
            "a.mp4",
        ])
        .unwrap();
        let thresholds = cli.thresholds().unwrap();
        assert_eq!(thresholds.duration_warning, 1.0);
        assert_eq!(thresholds.duration_notice, 0.1);
        assert_eq!(thresholds.packet_warning, 0.25);
    }

    #[test]
    fn test_invalid_thresholds() {
        let cli = SyncCli::try_parse_from(["debug_audio_sync", "--duration-notice", "0.9", "a.mp4"])
            .unwrap();
        assert!(matches!(cli.thresholds(), Err(AvSyncError::Config(_))));

        let cli = SyncCli::try_parse_from(["debug_audio_sync", "--start-offset", "-0.5", "a.mp4"])
            .unwrap();
        assert!(matches!(cli.thresholds(), Err(AvSyncError::Config(_))));
    }
}
