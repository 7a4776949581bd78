//! Subprocess execution with a deadline

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{AutomatorError, Result};
use crate::launch::types::{POLL_INTERVAL, ProcessOutput};

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Run a command to completion, killing it once `timeout` has passed
///
/// stdout/stderr are drained on background threads so a chatty child never
/// blocks on a full pipe. On Unix the child gets its own process group and the
/// whole group is killed on timeout, which also takes down the JVM the Fiji
/// launcher forks. The deadline covers the pipes too: a grandchild that keeps
/// them open after the launcher exits is killed with the group.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<ProcessOutput> {
    let program = cmd.get_program().to_string_lossy().into_owned();

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|source| AutomatorError::Spawn { program: program.clone(), source })?;
    let pid = child.id();
    log::debug!("launch - Spawned {} (pid {})", program, pid);

    let (tx, rx) = mpsc::channel();
    let mut pending = 0;
    if let Some(out) = child.stdout.take() {
        drain(out, Stream::Stdout, tx.clone());
        pending += 1;
    }
    if let Some(err) = child.stderr.take() {
        drain(err, Stream::Stderr, tx.clone());
        pending += 1;
    }
    drop(tx);

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            log::warn!(
                "launch - {} still running after {:.1}s, killing it",
                program,
                elapsed.as_secs_f32()
            );
            kill_process_tree(&mut child);
            let _ = child.wait();
            // Reader threads end on their own once the pipes close
            return Err(AutomatorError::Timeout { timeout });
        }

        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    };

    let mut stdout = String::new();
    let mut stderr = String::new();
    while pending > 0 {
        match rx.recv_timeout(timeout.saturating_sub(start.elapsed())) {
            Ok((Stream::Stdout, text)) => stdout = text,
            Ok((Stream::Stderr, text)) => stderr = text,
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "launch - {} exited but its output is still held open after {:.1}s, killing its process group",
                    program,
                    start.elapsed().as_secs_f32()
                );
                kill_group(pid);
                return Err(AutomatorError::Timeout { timeout });
            }
        }
        pending -= 1;
    }
    let elapsed = start.elapsed();

    log::debug!(
        "launch - {} exited with {:?} after {:.1}s",
        program,
        status.code(),
        elapsed.as_secs_f32()
    );

    Ok(ProcessOutput {
        code: status.code(),
        stdout,
        stderr,
        elapsed,
    })
}

fn drain<R: Read + Send + 'static>(mut reader: R, stream: Stream, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

#[cfg(unix)]
fn kill_group(pgid: u32) -> bool {
    // The child leads its own group (process_group(0)), so pgid == pid
    unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) == 0 }
}

#[cfg(not(unix))]
fn kill_group(_pgid: u32) -> bool {
    false
}

fn kill_process_tree(child: &mut Child) {
    if !kill_group(child.id()) {
        let _ = child.kill();
    }
}
