//! Detached process launcher adapter

use std::process::Stdio;

use colored::Colorize;
use tokio::process::Command;

use crate::application::ports::Launcher;
use crate::domain::notification::NotifyCommand;

/// Launcher that spawns commands on the tokio runtime.
///
/// Children are never awaited; tokio reaps them once they exit. The child's
/// stderr is inherited so notifier complaints end up in this process's log.
/// Must be called from within a tokio runtime.
pub struct TokioProcessLauncher;

impl TokioProcessLauncher {
    /// Create a new launcher
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokioProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for TokioProcessLauncher {
    fn launch(&self, command: &NotifyCommand) -> bool {
        let spawned = Command::new(command.program())
            .args(command.get_args())
            .envs(command.get_env().iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn();

        match spawned {
            Ok(_child) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("{} {} not found", "✗".red(), command.program());
                false
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to launch {}: {}",
                    "✗".red(),
                    command.program(),
                    e
                );
                false
            }
        }
    }
}
