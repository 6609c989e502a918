//! Detached child processes
//!
//! Launched applications and notification commands outlive the call that
//! started them. Each child is handed to a reaper thread that waits for it,
//! so a long-running host does not collect zombies.

use std::io;
use std::process::{Child, Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Spawn `command` with null stdio and reap it in the background
///
/// Returns the process id of the child.
pub fn spawn_detached(command: &mut Command) -> io::Result<u32> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let pid = child.id();
    reap(child);
    Ok(pid)
}

fn reap(mut child: Child) {
    let pid = child.id();
    let reaper = thread::Builder::new()
        .name(format!("reap-{}", pid))
        .spawn(move || match child.wait() {
            Ok(status) => debug!("Child {} exited with {}", pid, status),
            Err(e) => debug!("Failed to wait for child {}: {}", pid, e),
        });
    if let Err(e) = reaper {
        warn!("No reaper thread for child {}: {}", pid, e);
    }
}
