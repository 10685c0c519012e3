//! Configuration for probing and sync classification.
//!
//! Both structs carry defaults matching the stock behaviour of the tools and
//! are overridden field by field from command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AvSyncError, Result};

/// Program invoked when no explicit ffprobe path is configured
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// |video - audio| duration difference above which a WARNING is reported (seconds)
pub const DEFAULT_DURATION_WARNING: f64 = 0.5;

/// |video - audio| duration difference above which a NOTICE is reported (seconds)
pub const DEFAULT_DURATION_NOTICE: f64 = 0.1;

/// Start time offset above which the offset is reported (seconds)
pub const DEFAULT_START_OFFSET: f64 = 0.01;

/// Last packet timestamp difference above which a WARNING is reported (seconds)
pub const DEFAULT_PACKET_WARNING: f64 = 0.5;

/// Thresholds used to classify audio/video drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncThresholds {
    pub duration_warning: f64,
    pub duration_notice: f64,
    pub start_offset: f64,
    pub packet_warning: f64,
}

impl Default for SyncThresholds {
    fn default() -> Self {
        Self {
            duration_warning: DEFAULT_DURATION_WARNING,
            duration_notice: DEFAULT_DURATION_NOTICE,
            start_offset: DEFAULT_START_OFFSET,
            packet_warning: DEFAULT_PACKET_WARNING,
        }
    }
}

impl SyncThresholds {
    /// Validates the thresholds.
    ///
    /// Every threshold must be finite and non-negative, and the notice
    /// threshold may not exceed the warning threshold.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("duration warning", self.duration_warning),
            ("duration notice", self.duration_notice),
            ("start offset", self.start_offset),
            ("packet warning", self.packet_warning),
        ];

        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(AvSyncError::Config(format!(
                    "{} threshold must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }

        if self.duration_notice > self.duration_warning {
            return Err(AvSyncError::Config(format!(
                "duration notice threshold ({}s) exceeds duration warning threshold ({}s)",
                self.duration_notice, self.duration_warning
            )));
        }

        Ok(())
    }
}

/// How the external probing tool is invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Program name or path of the ffprobe binary
    pub ffprobe_path: PathBuf,
    /// Kill the probe after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE),
            timeout: None,
        }
    }
}

impl ProbeConfig {
    pub fn with_ffprobe(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffprobe_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(AvSyncError::Config("ffprobe path is empty".to_string()));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(AvSyncError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
