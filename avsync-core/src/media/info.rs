use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media stream types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    Unknown,
}

impl From<&str> for StreamType {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "subtitle" => StreamType::Subtitle,
            "attachment" => StreamType::Attachment,
            "data" => StreamType::Data,
            _ => StreamType::Unknown,
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // same spelling ffprobe uses for codec_type
        match self {
            StreamType::Video => write!(f, "video"),
            StreamType::Audio => write!(f, "audio"),
            StreamType::Subtitle => write!(f, "subtitle"),
            StreamType::Attachment => write!(f, "attachment"),
            StreamType::Data => write!(f, "data"),
            StreamType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A value read from ffprobe output.
///
/// A malformed value only poisons its own field: it renders as `N/A` and
/// skips every comparison that needs it, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field<T> {
    /// Key absent, null, empty or `N/A`
    Missing,
    /// Present but not a valid number; holds the raw text
    Malformed(String),
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T: Copy> Field<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Field::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

/// Parses a numeric field given either as a JSON string (ffprobe's usual
/// encoding) or as a JSON number.
fn parse_field<T: FromStr>(value: Option<&Value>) -> Field<T> {
    let raw = match value {
        None | Some(Value::Null) => return Field::Missing,
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => return Field::Malformed(other.to_string()),
    };

    if raw.is_empty() || raw == "N/A" {
        return Field::Missing;
    }

    match raw.parse::<T>() {
        Ok(v) => Field::Value(v),
        Err(_) => {
            log::warn!("Ignoring malformed numeric value {:?} in ffprobe output", raw);
            Field::Malformed(raw)
        }
    }
}

/// Like `parse_field`, but also rejects `inf`/`nan` which `f64::from_str` accepts
fn parse_seconds(value: Option<&Value>) -> Field<f64> {
    match parse_field::<f64>(value) {
        Field::Value(v) if !v.is_finite() => Field::Malformed(v.to_string()),
        other => other,
    }
}

/// Container level information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Duration in seconds
    pub duration: Field<f64>,
    /// Size in bytes
    pub size: Field<u64>,
    /// Bitrate in bits per second
    pub bit_rate: Field<u64>,
}

impl FormatInfo {
    /// Read the `format` section of a probe response.
    ///
    /// Returns `None` when the section is absent or empty, in which case the
    /// container section is left out of the report altogether.
    pub fn from_probe(json: &Value) -> Option<Self> {
        let format = json.get("format")?.as_object()?;
        if format.is_empty() {
            return None;
        }

        Some(Self {
            duration: parse_seconds(format.get("duration")),
            size: parse_field(format.get("size")),
            bit_rate: parse_field(format.get("bit_rate")),
        })
    }
}

/// One entry of the `streams` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    pub index: Option<u64>,
    pub codec_type: StreamType,
    pub duration: Field<f64>,
    pub start_time: Field<f64>,
    pub frame_count: Field<u64>,
}

impl StreamRecord {
    pub fn from_json(stream: &Value) -> Self {
        Self {
            index: stream.get("index").and_then(|i| i.as_u64()),
            codec_type: stream
                .get("codec_type")
                .and_then(|t| t.as_str())
                .map(StreamType::from)
                .unwrap_or(StreamType::Unknown),
            duration: parse_seconds(stream.get("duration")),
            start_time: parse_seconds(stream.get("start_time")),
            frame_count: parse_field(stream.get("nb_frames")),
        }
    }

    /// Index for display; `?` when ffprobe did not report one
    pub fn index_label(&self) -> String {
        self.index.map_or_else(|| "?".to_string(), |i| i.to_string())
    }
}

/// All stream records of a probe response, in ffprobe's order
pub fn streams_from_probe(json: &Value) -> Vec<StreamRecord> {
    json.get("streams")
        .and_then(|s| s.as_array())
        .map(|streams| streams.iter().map(StreamRecord::from_json).collect())
        .unwrap_or_default()
}

/// Timestamps of one packet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PacketTimestamp {
    pub presentation_time: Field<f64>,
    pub decode_time: Field<f64>,
}

impl PacketTimestamp {
    pub fn from_json(packet: &Value) -> Self {
        Self {
            presentation_time: parse_seconds(packet.get("pts_time")),
            decode_time: parse_seconds(packet.get("dts_time")),
        }
    }

    /// Presentation time, falling back to decode time.
    ///
    /// A timestamp of exactly zero is a real timestamp and is returned as is.
    pub fn seconds(&self) -> Option<f64> {
        self.presentation_time.value().or_else(|| self.decode_time.value())
    }
}

/// The last entry of the `packets` array, if there is one
pub fn last_packet_from_probe(json: &Value) -> Option<PacketTimestamp> {
    json.get("packets")
        .and_then(|p| p.as_array())
        .and_then(|packets| packets.last())
        .map(PacketTimestamp::from_json)
}

/// Format duration and stream timing, as read for the duration report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeOverview {
    pub format_duration: Field<f64>,
    pub streams: Vec<StreamRecord>,
}

impl ProbeOverview {
    pub fn from_probe(json: &Value) -> Self {
        let format_duration = json
            .get("format")
            .map(|f| parse_seconds(f.get("duration")))
            .unwrap_or_default();

        Self {
            format_duration,
            streams: streams_from_probe(json),
        }
    }
}
