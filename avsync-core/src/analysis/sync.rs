//! Audio/video drift classification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SyncThresholds;
use crate::media::{Field, StreamRecord, StreamType};

/// Severity of a drift measurement, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyncLevel {
    Ok,
    Notice,
    Warning,
}

impl fmt::Display for SyncLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncLevel::Ok => write!(f, "OK"),
            SyncLevel::Notice => write!(f, "NOTICE"),
            SyncLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// Duration and start of the first stream of a type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamTiming {
    pub duration: f64,
    /// `None` only when ffprobe reported a start time that could not be parsed
    pub start: Option<f64>,
}

impl StreamTiming {
    /// Timing of the first stream of `kind`.
    ///
    /// A stream without a usable duration yields `None`. An absent start time
    /// counts as 0; a malformed one is unknown.
    pub fn first_of(streams: &[StreamRecord], kind: StreamType) -> Option<Self> {
        let stream = streams.iter().find(|s| s.codec_type == kind)?;
        let duration = stream.duration.value()?;
        let start = match stream.start_time {
            Field::Value(start) => Some(start),
            Field::Missing => Some(0.0),
            Field::Malformed(_) => None,
        };

        Some(Self { duration, start })
    }
}

/// Video vs audio stream duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationCheck {
    pub video_duration: f64,
    pub audio_duration: f64,
    /// video - audio, in seconds
    pub diff: f64,
    pub level: SyncLevel,
}

impl DurationCheck {
    /// The stream that ends early, when the mismatch is large enough to warn about
    pub fn shorter_stream(&self) -> Option<StreamType> {
        match self.level {
            SyncLevel::Warning if self.diff > 0.0 => Some(StreamType::Audio),
            SyncLevel::Warning => Some(StreamType::Video),
            _ => None,
        }
    }
}

/// Video vs audio stream start time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartOffset {
    pub video_start: f64,
    pub audio_start: f64,
    /// video - audio, in seconds
    pub diff: f64,
    /// Whether the offset is above the reporting threshold
    pub significant: bool,
}

/// Video vs audio last packet timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacketCheck {
    pub video_last: f64,
    pub audio_last: f64,
    /// video - audio, in seconds
    pub diff: f64,
    pub level: SyncLevel,
}

/// Everything derived from one file's streams and packets.
///
/// Each comparison is `None` when one of its inputs is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub duration: Option<DurationCheck>,
    pub start_offset: Option<StartOffset>,
    pub last_packet: Option<PacketCheck>,
}

impl SyncReport {
    pub fn video_duration(&self) -> Option<f64> {
        self.duration.map(|d| d.video_duration)
    }

    pub fn audio_duration(&self) -> Option<f64> {
        self.duration.map(|d| d.audio_duration)
    }

    pub fn duration_diff(&self) -> Option<f64> {
        self.duration.map(|d| d.diff)
    }

    pub fn start_time_diff(&self) -> Option<f64> {
        self.start_offset.map(|s| s.diff)
    }

    pub fn last_packet_diff(&self) -> Option<f64> {
        self.last_packet.map(|p| p.diff)
    }

    /// Most severe level among the checks that ran
    pub fn worst_level(&self) -> SyncLevel {
        let levels = [
            self.duration.map(|d| d.level),
            self.last_packet.map(|p| p.level),
        ];
        levels.into_iter().flatten().max().unwrap_or(SyncLevel::Ok)
    }
}

/// Classify a video - audio duration difference
pub fn classify_duration(diff: f64, thresholds: &SyncThresholds) -> SyncLevel {
    let magnitude = diff.abs();
    if magnitude > thresholds.duration_warning {
        SyncLevel::Warning
    } else if magnitude > thresholds.duration_notice {
        SyncLevel::Notice
    } else {
        SyncLevel::Ok
    }
}

/// Classify a video - audio last packet difference
pub fn classify_packets(diff: f64, thresholds: &SyncThresholds) -> SyncLevel {
    if diff.abs() > thresholds.packet_warning {
        SyncLevel::Warning
    } else {
        SyncLevel::Ok
    }
}

/// Compare the first video and first audio stream of a file.
///
/// `video_last`/`audio_last` are the last packet timestamps of those streams,
/// when they could be read.
pub fn check_sync(
    streams: &[StreamRecord],
    video_last: Option<f64>,
    audio_last: Option<f64>,
    thresholds: &SyncThresholds,
) -> SyncReport {
    let video = StreamTiming::first_of(streams, StreamType::Video);
    let audio = StreamTiming::first_of(streams, StreamType::Audio);

    let duration = video.zip(audio).map(|(v, a)| {
        let diff = v.duration - a.duration;
        DurationCheck {
            video_duration: v.duration,
            audio_duration: a.duration,
            diff,
            level: classify_duration(diff, thresholds),
        }
    });

    let start_offset = video
        .and_then(|v| v.start)
        .zip(audio.and_then(|a| a.start))
        .map(|(video_start, audio_start)| {
            let diff = video_start - audio_start;
            StartOffset {
                video_start,
                audio_start,
                diff,
                significant: diff.abs() > thresholds.start_offset,
            }
        });

    let last_packet = video_last.zip(audio_last).map(|(video_last, audio_last)| {
        let diff = video_last - audio_last;
        PacketCheck {
            video_last,
            audio_last,
            diff,
            level: classify_packets(diff, thresholds),
        }
    });

    if let Some(check) = &duration {
        log::debug!(
            "Duration check: video={:.6}s audio={:.6}s diff={:.6}s -> {:?}",
            check.video_duration, check.audio_duration, check.diff, check.level
        );
    }

    SyncReport {
        duration,
        start_offset,
        last_packet,
    }
}
