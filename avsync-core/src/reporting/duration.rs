//! Report printed by `debug_duration`

use std::fmt;
use std::path::Path;

use crate::media::{Field, ProbeOverview};

/// Format and per-stream durations of one file, three decimals
pub struct DurationReport<'a> {
    pub path: &'a Path,
    pub overview: &'a ProbeOverview,
}

impl<'a> DurationReport<'a> {
    pub fn new(path: &'a Path, overview: &'a ProbeOverview) -> Self {
        Self { path, overview }
    }
}

impl fmt::Display for DurationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;

        // an absent format duration reads as zero
        match self.overview.format_duration {
            Field::Value(secs) => writeln!(f, "Format Duration: {:.3}s", secs)?,
            Field::Missing => writeln!(f, "Format Duration: {:.3}s", 0.0)?,
            Field::Malformed(_) => writeln!(f, "Format Duration: N/A")?,
        }

        for stream in &self.overview.streams {
            writeln!(f, "Stream #{} ({}):", stream.index_label(), stream.codec_type)?;

            match stream.start_time {
                Field::Value(start) => writeln!(f, "  Start Time: {:.3}s", start)?,
                Field::Malformed(_) => writeln!(f, "  Start Time: N/A")?,
                Field::Missing => {}
            }

            match stream.duration {
                Field::Value(duration) => writeln!(f, "  Duration:   {:.3}s", duration)?,
                _ => writeln!(f, "  Duration:   N/A (check packets)")?,
            }
        }

        Ok(())
    }
}
