//! Per-file analysis pipelines
//!
//! Both tools follow the same linear flow for each input: probe, extract,
//! compare. Nothing is shared between files, so a batch is just the single
//! file pipeline applied in order.
//!
//! - `probe_overview`: the single ffprobe call behind the duration report
//! - `analyze_file`: container, streams and sync checks for the sync report

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::SyncThresholds;
use crate::error::Result;
use crate::media::{
    FormatInfo, ProbeExecutor, ProbeOverview, ProbeRequest, StreamRecord, StreamType,
    last_packet_from_probe, streams_from_probe,
};

pub mod sync;

pub use sync::{
    DurationCheck, PacketCheck, StartOffset, StreamTiming, SyncLevel, SyncReport,
    check_sync, classify_duration, classify_packets,
};

/// Probe format duration and stream timing for the duration report.
///
/// Any probe failure is returned to the caller, which treats it as fatal.
pub fn probe_overview<E: ProbeExecutor + ?Sized>(path: &Path, probe: &E) -> Result<ProbeOverview> {
    let json = probe.probe(path, ProbeRequest::Overview)?;
    Ok(ProbeOverview::from_probe(&json))
}

/// Outcome of analysing one file for the sync report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileAnalysis {
    /// The path does not exist; nothing was probed
    NotFound { path: PathBuf },
    /// Streams could not be read (probe failure or no streams at all)
    NoStreamInfo {
        path: PathBuf,
        container: Option<FormatInfo>,
    },
    Complete {
        path: PathBuf,
        container: Option<FormatInfo>,
        streams: Vec<StreamRecord>,
        sync: SyncReport,
    },
}

impl FileAnalysis {
    pub fn path(&self) -> &Path {
        match self {
            FileAnalysis::NotFound { path }
            | FileAnalysis::NoStreamInfo { path, .. }
            | FileAnalysis::Complete { path, .. } => path,
        }
    }
}

/// Container section of the report; a failed probe just leaves it out
fn container_info<E: ProbeExecutor + ?Sized>(path: &Path, probe: &E) -> Option<FormatInfo> {
    match probe.probe(path, ProbeRequest::Format) {
        Ok(json) => FormatInfo::from_probe(&json),
        Err(e) => {
            log::warn!("Could not read container info for {}: {}", path.display(), e);
            None
        }
    }
}

/// Last packet timestamp of the first stream of `kind`, if it can be read
pub fn last_packet_time<E: ProbeExecutor + ?Sized>(
    path: &Path,
    kind: StreamType,
    probe: &E,
) -> Option<f64> {
    match probe.probe(path, ProbeRequest::Packets(kind)) {
        Ok(json) => last_packet_from_probe(&json).and_then(|packet| packet.seconds()),
        Err(e) => {
            log::warn!("Could not read {} packets of {}: {}", kind, path.display(), e);
            None
        }
    }
}

/// Analyse one file for the sync report.
///
/// Never fails: every problem is captured in the returned outcome so the
/// caller can report it and move on to the next file.
pub fn analyze_file<E: ProbeExecutor + ?Sized>(
    path: &Path,
    probe: &E,
    thresholds: &SyncThresholds,
) -> FileAnalysis {
    log::info!("Analyzing {}", path.display());

    if !path.exists() {
        log::warn!("File not found: {}", path.display());
        return FileAnalysis::NotFound {
            path: path.to_path_buf(),
        };
    }

    let container = container_info(path, probe);

    let streams = match probe.probe(path, ProbeRequest::Streams) {
        Ok(json) => streams_from_probe(&json),
        Err(e) => {
            log::warn!("Could not read streams of {}: {}", path.display(), e);
            Vec::new()
        }
    };

    if streams.is_empty() {
        return FileAnalysis::NoStreamInfo {
            path: path.to_path_buf(),
            container,
        };
    }

    let video_last = last_packet_time(path, StreamType::Video, probe);
    let audio_last = last_packet_time(path, StreamType::Audio, probe);
    let sync = check_sync(&streams, video_last, audio_last, thresholds);

    FileAnalysis::Complete {
        path: path.to_path_buf(),
        container,
        streams,
        sync,
    }
}

/// Analyse files one after another, in the given order
pub fn analyze_batch<'a, E, P>(
    paths: &'a [P],
    probe: &'a E,
    thresholds: &'a SyncThresholds,
) -> impl Iterator<Item = FileAnalysis> + 'a
where
    E: ProbeExecutor + ?Sized,
    P: AsRef<Path>,
{
    paths
        .iter()
        .map(move |path| analyze_file(path.as_ref(), probe, thresholds))
}
