//! Report printed by `debug_audio_sync`

use std::fmt;

use super::{SEPARATOR, millis_label, or_na};
use crate::analysis::{FileAnalysis, SyncLevel, SyncReport};
use crate::config::SyncThresholds;
use crate::media::{Field, FormatInfo, StreamRecord, StreamType};

/// Printed once after the last file of a batch
pub const BATCH_FOOTER: &str = "\n\n";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Sync report for one analysed file
pub struct SyncFileReport<'a> {
    pub analysis: &'a FileAnalysis,
    pub thresholds: &'a SyncThresholds,
}

impl<'a> SyncFileReport<'a> {
    pub fn new(analysis: &'a FileAnalysis, thresholds: &'a SyncThresholds) -> Self {
        Self { analysis, thresholds }
    }
}

fn write_heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n{}", SEPARATOR)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", SEPARATOR)
}

fn write_container(f: &mut fmt::Formatter<'_>, container: &FormatInfo) -> fmt::Result {
    writeln!(f, "\nContainer Info:")?;
    writeln!(f, "  Duration: {}", or_na(&container.duration, |d| format!("{:.3}s", d)))?;
    writeln!(
        f,
        "  Size: {}",
        or_na(&container.size, |s| format!("{:.2} MB", *s as f64 / BYTES_PER_MB))
    )?;
    writeln!(
        f,
        "  Bit Rate: {}",
        or_na(&container.bit_rate, |b| format!("{:.0} kb/s", *b as f64 / 1000.0))
    )
}

fn write_stream(f: &mut fmt::Formatter<'_>, stream: &StreamRecord) -> fmt::Result {
    writeln!(f, "\n  Stream #{} ({}):", stream.index_label(), stream.codec_type)?;

    // absent fields are left out; malformed ones are shown as N/A
    if !stream.start_time.is_missing() {
        writeln!(f, "    Start Time: {}", or_na(&stream.start_time, |s| format!("{:.6}s", s)))?;
    }
    if !stream.duration.is_missing() {
        writeln!(f, "    Duration:   {}", or_na(&stream.duration, |d| format!("{:.6}s", d)))?;
    }
    match &stream.frame_count {
        Field::Value(frames) => writeln!(f, "    Frames:     {}", frames)?,
        Field::Malformed(_) => writeln!(f, "    Frames:     N/A")?,
        Field::Missing => {}
    }

    Ok(())
}

fn write_analysis(
    f: &mut fmt::Formatter<'_>,
    sync: &SyncReport,
    thresholds: &SyncThresholds,
) -> fmt::Result {
    write_heading(f, "ANALYSIS:")?;

    if let Some(check) = &sync.duration {
        writeln!(f, "\n  Video Duration: {:.6}s", check.video_duration)?;
        writeln!(f, "  Audio Duration: {:.6}s", check.audio_duration)?;
        writeln!(f, "  Difference:     {:.6}s ({:.2}ms)", check.diff, check.diff * 1000.0)?;

        match check.level {
            SyncLevel::Warning => {
                writeln!(
                    f,
                    "\n  {}: Audio/Video duration mismatch > {}!",
                    SyncLevel::Warning,
                    millis_label(thresholds.duration_warning)
                )?;
                match check.shorter_stream() {
                    Some(StreamType::Audio) => {
                        writeln!(f, "      Audio is {:.3}s SHORTER than video", check.diff.abs())?;
                        writeln!(f, "      This causes audio to cut off at the end!")?;
                    }
                    _ => writeln!(f, "      Video is {:.3}s SHORTER than audio", check.diff.abs())?,
                }
            }
            SyncLevel::Notice => writeln!(
                f,
                "\n  {}: Audio/Video duration mismatch > {}",
                SyncLevel::Notice,
                millis_label(thresholds.duration_notice)
            )?,
            SyncLevel::Ok => writeln!(
                f,
                "\n  {}: Audio/Video durations are well synchronized",
                SyncLevel::Ok
            )?,
        }
    }

    if let Some(offset) = sync.start_offset.filter(|o| o.significant) {
        writeln!(f, "\n  Start Time Offset:")?;
        writeln!(f, "    Video starts at: {:.6}s", offset.video_start)?;
        writeln!(f, "    Audio starts at: {:.6}s", offset.audio_start)?;
        writeln!(f, "    Offset: {:.2}ms", offset.diff * 1000.0)?;
    }

    writeln!(f, "\nChecking last packet timestamps...")?;
    if let Some(packets) = &sync.last_packet {
        writeln!(f, "  Last Video Packet: {:.6}s", packets.video_last)?;
        writeln!(f, "  Last Audio Packet: {:.6}s", packets.audio_last)?;
        writeln!(
            f,
            "  Packet Difference: {:.6}s ({:.2}ms)",
            packets.diff,
            packets.diff * 1000.0
        )?;

        if packets.level == SyncLevel::Warning {
            writeln!(
                f,
                "\n  {}: Last packets are > {} apart!",
                SyncLevel::Warning,
                millis_label(thresholds.packet_warning)
            )?;
        }
    }

    Ok(())
}

impl fmt::Display for SyncFileReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.analysis.path();
        write_heading(f, &format!("Analyzing: {}", path.display()))?;

        match self.analysis {
            FileAnalysis::NotFound { .. } => {
                writeln!(f, "ERROR: File not found: {}", path.display())
            }
            FileAnalysis::NoStreamInfo { container, .. } => {
                if let Some(container) = container {
                    write_container(f, container)?;
                }
                writeln!(f, "ERROR: Could not get stream info")
            }
            FileAnalysis::Complete {
                container,
                streams,
                sync,
                ..
            } => {
                if let Some(container) = container {
                    write_container(f, container)?;
                }

                writeln!(f, "\nStreams:")?;
                for stream in streams {
                    write_stream(f, stream)?;
                }

                write_analysis(f, sync, self.thresholds)
            }
        }
    }
}
