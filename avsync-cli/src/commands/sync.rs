// avsync-cli/src/commands/sync.rs
//
// Implementation of `debug_audio_sync`: analyse each file in order and print
// its report as soon as it is ready.

use std::io::Write;
use std::path::PathBuf;

use avsync_core::{
    BATCH_FOOTER, FileAnalysis, ProbeExecutor, Result, SyncFileReport, SyncLevel,
    SyncThresholds, analyze_batch,
};

/// Analyse `files` and write one report per file, followed by the batch footer.
///
/// Per-file problems are part of the reports; only a failing writer is an
/// error here.
pub fn run_sync<E, W>(
    files: &[PathBuf],
    probe: &E,
    thresholds: &SyncThresholds,
    out: &mut W,
) -> Result<()>
where
    E: ProbeExecutor + ?Sized,
    W: Write,
{
    for analysis in analyze_batch(files, probe, thresholds) {
        log_outcome(&analysis);
        write!(out, "{}", SyncFileReport::new(&analysis, thresholds))?;
        out.flush()?;
    }

    write!(out, "{}", BATCH_FOOTER)?;
    out.flush()?;
    Ok(())
}

fn log_outcome(analysis: &FileAnalysis) {
    let path = analysis.path().display();
    match analysis {
        FileAnalysis::NotFound { .. } => log::error!("{}: file not found", path),
        FileAnalysis::NoStreamInfo { .. } => log::error!("{}: no stream info", path),
        FileAnalysis::Complete { sync, .. } => match sync.worst_level() {
            SyncLevel::Warning => log::warn!("{}: audio/video out of sync", path),
            level => log::info!("{}: {}", path, level),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avsync_core::{AvSyncError, ProbeRequest};
    use serde_json::{Value, json};
    use std::path::Path;

    /// Every existing file gets the same healthy streams
    struct SameForAll;

    impl ProbeExecutor for SameForAll {
        fn probe(&self, _path: &Path, request: ProbeRequest) -> Result<Value> {
            match request {
                ProbeRequest::Streams => Ok(json!({"streams": [
                    {"index": 0, "codec_type": "video", "duration": "4.000000"},
                    {"index": 1, "codec_type": "audio", "duration": "4.000000"}
                ]})),
                _ => Err(AvSyncError::CommandFailed {
                    program: "ffprobe".to_string(),
                    code: 1,
                    stderr: String::new(),
                }),
            }
        }
    }

    #[test]
    fn test_reports_in_order_with_footer() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.mp4");
        std::fs::write(&present, b"").unwrap();
        let missing = dir.path().join("missing.mp4");

        let mut out = Vec::new();
        run_sync(
            &[missing.clone(), present.clone()],
            &SameForAll,
            &SyncThresholds::default(),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        let not_found = text
            .find(&format!("ERROR: File not found: {}", missing.display()))
            .unwrap();
        let ok = text
            .find("OK: Audio/Video durations are well synchronized")
            .unwrap();
        assert!(not_found < ok);
        assert!(text.ends_with("Checking last packet timestamps...\n\n\n"));
    }

    #[test]
    fn test_empty_batch_prints_only_footer() {
        let mut out = Vec::new();
        run_sync(&[], &SameForAll, &SyncThresholds::default(), &mut out).unwrap();
        assert_eq!(out, BATCH_FOOTER.as_bytes());
    }
}
