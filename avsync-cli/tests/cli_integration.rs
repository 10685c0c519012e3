use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// Helper function to get the path to a compiled binary
fn tool(name: &str) -> Command {
    Command::cargo_bin(name).expect("Failed to find binary")
}

fn fake_ffprobe() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fake_ffprobe")
}

fn touch(dir: &Path, name: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    std::fs::write(&path, b"not really media")?;
    Ok(path)
}

#[test]
fn test_duration_without_file_prints_usage() {
    tool("debug_duration")
        .assert()
        .code(1)
        .stdout("Usage: debug_duration <video_file>\n");
}

#[test]
fn test_sync_without_files_prints_usage_and_example() {
    tool("debug_audio_sync")
        .assert()
        .code(1)
        .stdout(contains("Usage: debug_audio_sync"))
        .stdout(contains("\nExample:\n  debug_audio_sync /tmp/recording_*.mp4\n"));
}

#[test]
fn test_help_exits_successfully() {
    tool("debug_audio_sync")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--duration-warning"));
}

#[test]
fn test_duration_with_missing_ffprobe_binary() {
    tool("debug_duration")
        .args(["--ffprobe", "/surely/not/here/ffprobe", "clip.mp4"])
        .assert()
        .code(1)
        .stdout(contains("Error running ffprobe:"));
}

#[test]
fn test_duration_rejects_zero_timeout() {
    tool("debug_duration")
        .args(["--timeout", "0", "clip.mp4"])
        .assert()
        .code(1)
        .stdout(contains("Invalid configuration"));
}

#[test]
fn test_sync_rejects_invalid_thresholds() {
    tool("debug_audio_sync")
        .args(["--duration-notice", "2", "--duration-warning", "1", "clip.mp4"])
        .assert()
        .code(1)
        .stdout(contains("Invalid configuration"))
        .stdout(contains("Analyzing").not());
}

#[test]
fn test_sync_reports_missing_file_and_succeeds() {
    tool("debug_audio_sync")
        .args(["--ffprobe", "/surely/not/here/ffprobe", "/surely/not/here/clip.mp4"])
        .assert()
        .success()
        .stdout(contains("Analyzing: /surely/not/here/clip.mp4"))
        .stdout(contains("ERROR: File not found: /surely/not/here/clip.mp4"));
}

#[cfg(unix)]
#[test]
fn test_duration_report_from_probe_output() {
    tool("debug_duration")
        .arg("--ffprobe")
        .arg(fake_ffprobe())
        .arg("rec.mp4")
        .assert()
        .success()
        .stdout(
            "File: rec.mp4\n\
             Format Duration: 10.600s\n\
             Stream #0 (video):\n  Start Time: 0.000s\n  Duration:   10.600s\n\
             Stream #1 (audio):\n  Start Time: 0.000s\n  Duration:   10.000s\n",
        );
}

#[cfg(unix)]
#[test]
fn test_duration_probe_failure_shows_ffprobe_error() {
    tool("debug_duration")
        .arg("--ffprobe")
        .arg(fake_ffprobe())
        .arg("broken.mp4")
        .assert()
        .code(1)
        .stdout(contains(
            "Error running ffprobe: broken.mp4: Invalid data found when processing input",
        ));
}

#[cfg(unix)]
#[test]
fn test_sync_batch_continues_past_failures() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let first = touch(dir.path(), "first.mp4")?;
    let broken = touch(dir.path(), "broken.mp4")?;
    let missing = dir.path().join("missing.mp4");

    let output = tool("debug_audio_sync")
        .arg("--ffprobe")
        .arg(fake_ffprobe())
        .arg(&first)
        .arg(&broken)
        .arg(&missing)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let sections: Vec<_> = stdout.match_indices("Analyzing: ").map(|(i, _)| i).collect();
    assert_eq!(sections.len(), 3);

    let first_report = &stdout[sections[0]..sections[1]];
    assert!(first_report.contains("  Size: 5.00 MB\n  Bit Rate: 3957 kb/s\n"));
    assert!(first_report.contains("    Frames:     318\n"));
    assert!(first_report.contains("  WARNING: Audio/Video duration mismatch > 500ms!\n"));
    assert!(first_report.contains("      Audio is 0.600s SHORTER than video\n"));
    assert!(first_report.contains("  Packet Difference: 0.588000s (588.00ms)\n"));
    assert!(first_report.contains("  WARNING: Last packets are > 500ms apart!\n"));

    let broken_report = &stdout[sections[1]..sections[2]];
    assert!(broken_report.contains("ERROR: Could not get stream info\n"));
    assert!(!broken_report.contains("Container Info"));

    let missing_report = &stdout[sections[2]..];
    assert!(missing_report.contains(&format!("ERROR: File not found: {}", missing.display())));
    assert!(stdout.ends_with("\n\n\n"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_sync_threshold_override_changes_verdict() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let clip = touch(dir.path(), "clip.mp4")?;

    tool("debug_audio_sync")
        .arg("--ffprobe")
        .arg(fake_ffprobe())
        .args(["--duration-warning", "1.0", "--packet-warning", "1.0"])
        .arg(&clip)
        .assert()
        .success()
        .stdout(contains("  NOTICE: Audio/Video duration mismatch > 100ms\n"))
        .stdout(contains("WARNING").not());

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_reports_are_stable_across_runs() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let clip = touch(dir.path(), "clip.mp4")?;

    let run = || {
        tool("debug_audio_sync")
            .arg("--ffprobe")
            .arg(fake_ffprobe())
            .arg(&clip)
            .output()
    };
    assert_eq!(run()?.stdout, run()?.stdout);

    Ok(())
}
