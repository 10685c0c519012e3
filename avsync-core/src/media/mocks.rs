// avsync-core/src/media/mocks.rs

// --- Scripted ffprobe (for testing) ---

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::probe::{ProbeExecutor, ProbeRequest};
use crate::error::{AvSyncError, Result};

/// Answers probe requests from a table of canned JSON responses.
///
/// Unscripted requests fail like ffprobe does for an unreadable input
/// (exit status 1). Every call is recorded in order.
#[derive(Default)]
pub struct ScriptedProbe {
    responses: HashMap<(PathBuf, ProbeRequest), Value>,
    failing: HashMap<PathBuf, i32>,
    calls: RefCell<Vec<(PathBuf, ProbeRequest)>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn respond(mut self, path: impl AsRef<Path>, request: ProbeRequest, json: Value) -> Self {
        self.responses.insert((path.as_ref().to_path_buf(), request), json);
        self
    }

    /// Make every request for `path` exit with `code`
    pub fn fail(mut self, path: impl AsRef<Path>, code: i32) -> Self {
        self.failing.insert(path.as_ref().to_path_buf(), code);
        self
    }

    pub fn calls(&self) -> Vec<(PathBuf, ProbeRequest)> {
        self.calls.borrow().clone()
    }
}

impl ProbeExecutor for ScriptedProbe {
    fn probe(&self, path: &Path, request: ProbeRequest) -> Result<Value> {
        self.calls.borrow_mut().push((path.to_path_buf(), request));

        let failed = |code: i32| AvSyncError::CommandFailed {
            program: "ffprobe".to_string(),
            code,
            stderr: format!("{}: Invalid data found when processing input\n", path.display()),
        };

        if let Some(code) = self.failing.get(path) {
            return Err(failed(*code));
        }

        self.responses
            .get(&(path.to_path_buf(), request))
            .cloned()
            .ok_or_else(|| failed(1))
    }
}
