// avsync-cli/src/commands/duration.rs
//
// Implementation of `debug_duration`: one ffprobe call, one report.

use std::io::Write;
use std::path::Path;

use avsync_core::{DurationReport, ProbeExecutor, Result, probe_overview};

/// Probe `path` and write its duration report to `out`.
///
/// A probe failure is returned before anything is written.
pub fn run_duration<E, W>(path: &Path, probe: &E, out: &mut W) -> Result<()>
where
    E: ProbeExecutor + ?Sized,
    W: Write,
{
    let overview = probe_overview(path, probe)?;
    log::debug!(
        "{}: {} stream(s) reported",
        path.display(),
        overview.streams.len()
    );

    write!(out, "{}", DurationReport::new(path, &overview))?;
    out.flush()?;
    Ok(())
}
