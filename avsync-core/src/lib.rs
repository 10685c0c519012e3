//! Core library for the ffprobe based audio/video diagnostics.
//!
//! This crate runs ffprobe, extracts stream and packet timing from its JSON
//! output, compares audio against video, and renders the plain-text reports
//! printed by the `debug_duration` and `debug_audio_sync` tools.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use avsync_core::{FfprobeExecutor, SyncFileReport, SyncThresholds, analyze_file};
//! use std::path::Path;
//!
//! let probe = FfprobeExecutor::new();
//! let thresholds = SyncThresholds::default();
//! thresholds.validate().unwrap();
//!
//! let analysis = analyze_file(Path::new("/tmp/recording.mp4"), &probe, &thresholds);
//! print!("{}", SyncFileReport::new(&analysis, &thresholds));
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod reporting;
pub mod util;

// Re-exports for public API
pub use analysis::{
    FileAnalysis, SyncLevel, SyncReport, analyze_batch, analyze_file, check_sync, probe_overview,
};
pub use config::{ProbeConfig, SyncThresholds};
pub use error::{AvSyncError, Result};
pub use media::{FfprobeExecutor, ProbeExecutor, ProbeOverview, ProbeRequest, StreamType};
pub use reporting::{BATCH_FOOTER, DurationReport, SyncFileReport};
