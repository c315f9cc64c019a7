//! External process execution with an optional hard-kill deadline.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::errors::{CollectorError, DataSource};

/// How often a deadline-bounded child is polled for exit.
const WAIT_POLL: Duration = Duration::from_millis(20);

/// Seam between collectors and the operating system.
///
/// Collectors only ever see combined stdout+stderr text or a typed failure,
/// which lets tests substitute canned tool output.
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` to completion and return its combined output.
    ///
    /// With `timeout = Some(d)` the child is killed once `d` elapses and the
    /// call fails with [`CollectorError::Timeout`].
    fn run(
        &self,
        origin: DataSource,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<String, CollectorError>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        origin: DataSource,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<String, CollectorError> {
        debug!(%origin, program, ?args, "spawning collector process");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CollectorError::Launch {
                origin,
                program: program.to_string(),
                details: e.to_string(),
            })?;

        // Drain both pipes on their own threads so a chatty child can never
        // block on a full pipe while we wait for it.
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = match timeout {
            Some(limit) => wait_with_deadline(&mut child, limit),
            None => child.wait().map(Some),
        }
        .map_err(|e| CollectorError::Launch {
            origin,
            program: program.to_string(),
            details: e.to_string(),
        })?;

        let mut output = join_reader(stdout);
        output.push_str(&join_reader(stderr));

        match status {
            None => {
                let after = timeout.unwrap_or_default();
                warn!(%origin, program, ?after, "collector process killed at deadline");
                Err(CollectorError::Timeout {
                    origin,
                    program: program.to_string(),
                    after,
                })
            }
            Some(status) if status.success() => Ok(output),
            Some(status) => Err(CollectorError::Exit {
                origin,
                program: program.to_string(),
                status: status.to_string(),
                output: output.trim_end().to_string(),
            }),
        }
    }
}

/// Wait for `child` until `limit` elapses. `Ok(None)` means the deadline hit
/// and the child was killed.
fn wait_with_deadline(
    child: &mut Child,
    limit: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(WAIT_POLL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
