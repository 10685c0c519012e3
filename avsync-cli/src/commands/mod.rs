//! Command implementations for the CLI.
//!
//! Each submodule contains the logic behind one of the binaries, written
//! against a `ProbeExecutor` and a writer so it can run without ffprobe.

/// Container and stream durations of a single file (`debug_duration`).
pub mod duration;
pub mod sync;
