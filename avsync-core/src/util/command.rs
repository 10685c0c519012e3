use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{debug, error};

use crate::error::{AvSyncError, Result};
use crate::logging;

/// Interval between `try_wait` polls while a timeout is active
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn program_name(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

/// Turn a finished process into `Ok(output)` or a `CommandFailed` error
fn check_status(program: String, output: Output) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    // termination by signal has no exit code
    let code = output.status.code().unwrap_or(-1);
    error!("{} failed with exit code {}: {}", program, code, stderr.trim_end());

    Err(AvSyncError::CommandFailed { program, code, stderr })
}

/// Execute a simple command and return the output
///
/// Blocks until the process exits. A non-zero exit status is an error that
/// carries the process's stderr.
pub fn run_command(cmd: &mut Command) -> Result<Output> {
    logging::log_command(cmd);
    let program = program_name(cmd);

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            error!("Failed to execute {}: {}", program, e);
            AvSyncError::CommandStart(program.clone(), e)
        })?;

    check_status(program, output)
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut reader) = reader {
            if let Err(e) = reader.read_to_end(&mut buf) {
                debug!("Stopped reading child output: {}", e);
            }
        }
        buf
    })
}

/// Execute a command, killing it if it runs longer than `timeout`
///
/// stdout and stderr are drained on helper threads so a chatty child can
/// never block on a full pipe while we poll it.
pub fn run_command_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output> {
    logging::log_command(cmd);
    let program = program_name(cmd);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!("Failed to spawn {}: {}", program, e);
            AvSyncError::CommandStart(program.clone(), e)
        })?;

    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        if start.elapsed() >= timeout {
            // the child may have exited between the poll and the kill
            let _ = child.kill();
            let _ = child.wait();
            error!("{} timed out after {:?}, killed", program, timeout);
            return Err(AvSyncError::Timeout(program, timeout));
        }

        thread::sleep(POLL_INTERVAL);
    };

    let output = Output {
        status,
        stdout: stdout_handle.join().unwrap_or_default(),
        stderr: stderr_handle.join().unwrap_or_default(),
    };

    check_status(program, output)
}
