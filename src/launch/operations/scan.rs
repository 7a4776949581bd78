//! Process table probes

use std::process::Command;

/// Check whether a process matching `name` is currently running
///
/// Uses `tasklist` on Windows and `pgrep -f` elsewhere; any failure to run the
/// probe counts as "not running".
pub fn is_process_running(name: &str) -> bool {
    let output = if cfg!(windows) {
        Command::new("tasklist")
            .args(["/FI", &format!("IMAGENAME eq {}", name)])
            .output()
    } else {
        Command::new("pgrep").args(["-f", name]).output()
    };

    match output {
        Ok(o) if cfg!(windows) => {
            o.status.success() && String::from_utf8_lossy(&o.stdout).contains(name)
        }
        Ok(o) => o.status.success() && !o.stdout.is_empty(),
        Err(_) => false,
    }
}
