//! Media information and probing module
//!
//! This module runs ffprobe for the handful of requests the reports need and
//! turns its JSON answers into typed, tolerant records.

pub mod info;
pub mod probe;

#[cfg(test)]
pub(crate) mod mocks;

// Re-export commonly used types
pub use info::{
    Field, FormatInfo, PacketTimestamp, ProbeOverview, StreamRecord, StreamType,
    last_packet_from_probe, streams_from_probe,
};
pub use probe::{FfprobeExecutor, ProbeExecutor, ProbeRequest};
