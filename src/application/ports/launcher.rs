//! Command launcher port interface

use crate::domain::notification::NotifyCommand;

/// Port for starting an external command without waiting on it.
///
/// The outcome of the command is never reported back. The returned flag only
/// says whether the process was handed to the OS; implementations log spawn
/// failures themselves.
pub trait Launcher: Send + Sync {
    /// Start `command` detached.
    ///
    /// # Returns
    /// `true` if the process was spawned
    fn launch(&self, command: &NotifyCommand) -> bool;
}

impl Launcher for Box<dyn Launcher> {
    fn launch(&self, command: &NotifyCommand) -> bool {
        self.as_ref().launch(command)
    }
}
