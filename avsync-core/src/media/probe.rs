use std::fmt;
use std::path::Path;
use std::process::Command;
use serde_json::Value;

use crate::config::ProbeConfig;
use crate::error::{AvSyncError, Result};
use crate::media::info::StreamType;
use crate::util::command;

/// Format duration plus the per-stream timing fields, in one call
pub const OVERVIEW_ENTRIES: &str = "format=duration:stream=index,codec_type,duration,start_time";

/// Container level duration, byte size and bit rate
pub const FORMAT_ENTRIES: &str = "format=duration,size,bit_rate";

/// Per-stream timing and frame count
pub const STREAM_ENTRIES: &str = "stream=index,codec_type,duration,start_time,nb_frames,time_base";

/// Packet timestamps
pub const PACKET_ENTRIES: &str = "packet=pts_time,dts_time";

/// The metadata a single ffprobe call asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeRequest {
    /// Format duration and stream timing, as used by the duration report
    Overview,
    /// Container level fields
    Format,
    /// Stream records
    Streams,
    /// Every packet of the first stream of the given type
    Packets(StreamType),
}

impl ProbeRequest {
    /// The `-show_entries` selection for this request
    pub fn entries(&self) -> &'static str {
        match self {
            ProbeRequest::Overview => OVERVIEW_ENTRIES,
            ProbeRequest::Format => FORMAT_ENTRIES,
            ProbeRequest::Streams => STREAM_ENTRIES,
            ProbeRequest::Packets(_) => PACKET_ENTRIES,
        }
    }

    /// Stream specifier restricting a packet listing to the first stream of a type
    pub fn stream_selector(&self) -> Option<&'static str> {
        match self {
            ProbeRequest::Packets(StreamType::Video) => Some("v:0"),
            ProbeRequest::Packets(StreamType::Audio) => Some("a:0"),
            _ => None,
        }
    }

    /// ffprobe arguments, excluding the input path which always goes last
    pub fn args(&self) -> Vec<&'static str> {
        let mut args = vec!["-v", "error"];
        if let Some(selector) = self.stream_selector() {
            args.extend(["-select_streams", selector]);
        }
        args.extend(["-show_entries", self.entries(), "-of", "json"]);
        args
    }
}

impl fmt::Display for ProbeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeRequest::Overview => write!(f, "overview"),
            ProbeRequest::Format => write!(f, "format"),
            ProbeRequest::Streams => write!(f, "streams"),
            ProbeRequest::Packets(kind) => write!(f, "{} packets", kind),
        }
    }
}

/// Something that can answer probe requests with ffprobe-shaped JSON.
///
/// Analysis code only talks to this trait, so tests can substitute canned
/// responses for the real binary.
pub trait ProbeExecutor {
    fn probe(&self, path: &Path, request: ProbeRequest) -> Result<Value>;
}

/// FFprobe command executor
#[derive(Debug, Clone, Default)]
pub struct FfprobeExecutor {
    config: ProbeConfig,
}

impl FfprobeExecutor {
    /// Create an executor running the default `ffprobe` with no timeout
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Build the command line for a request without running it
    pub fn command(&self, path: &Path, request: ProbeRequest) -> Command {
        let mut cmd = Command::new(&self.config.ffprobe_path);
        cmd.args(request.args()).arg(path);
        cmd
    }
}

impl ProbeExecutor for FfprobeExecutor {
    fn probe(&self, path: &Path, request: ProbeRequest) -> Result<Value> {
        log::debug!("Probing {} of {}", request, path.display());

        let mut cmd = self.command(path, request);
        let output = match self.config.timeout {
            Some(timeout) => command::run_command_with_timeout(&mut cmd, timeout)?,
            None => command::run_command(&mut cmd)?,
        };

        parse_output(&output.stdout).inspect_err(|e| {
            log::error!("ffprobe returned unusable output for {}: {}", path.display(), e);
        })
    }
}

/// Parse the stdout of an `-of json` run
pub fn parse_output(stdout: &[u8]) -> Result<Value> {
    serde_json::from_slice(stdout).map_err(|e| AvSyncError::JsonParse("ffprobe".to_string(), e))
}
