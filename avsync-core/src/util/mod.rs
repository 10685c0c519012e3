//! Utility functions and helpers module
//!
//! Command execution infrastructure shared by the ffprobe invoker: blocking
//! runs, runs with a timeout, and uniform error mapping for both.

pub mod command;

// Re-export commonly used functions
pub use command::{run_command, run_command_with_timeout};
