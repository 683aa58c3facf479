//! Dispatch alert use case

use std::sync::Arc;

use crate::domain::alert::{AlertPayload, DEFAULT_TITLE};
use crate::domain::config::{DEFAULT_IDENTITY_SWITCH_COMMAND, DEFAULT_NOTIFY_COMMAND};
use crate::domain::notification::{NotifyCommand, Urgency, NOTIFY_TIMEOUT_MS};
use crate::domain::session::SessionContext;

use super::ports::Launcher;

/// Configuration for alert dispatch
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Notifier program
    pub notify_command: String,
    /// Program used to run the notifier as another user
    pub identity_switch_command: String,
    /// Title used when a payload has none
    pub default_title: String,
    /// Whether this process runs with superuser privileges
    pub running_as_superuser: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            notify_command: DEFAULT_NOTIFY_COMMAND.to_string(),
            identity_switch_command: DEFAULT_IDENTITY_SWITCH_COMMAND.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            running_as_superuser: false,
        }
    }
}

/// Turns alerts into notifier launches.
///
/// Shared by every request handler; holds only immutable state.
pub struct DispatchAlertUseCase<L>
where
    L: Launcher,
{
    launcher: L,
    session: Arc<SessionContext>,
    config: DispatchConfig,
}

impl<L> DispatchAlertUseCase<L>
where
    L: Launcher,
{
    /// Create a new use case instance
    pub fn new(launcher: L, session: Arc<SessionContext>, config: DispatchConfig) -> Self {
        Self {
            launcher,
            session,
            config,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Whether the notifier has to be run as the desktop user.
    ///
    /// A superuser cannot talk to another user's session bus, so the
    /// notifier is re-run under the resolved user's identity.
    pub fn needs_identity_switch(&self) -> bool {
        self.config.running_as_superuser && self.session.has_target_user()
    }

    /// Build the notifier command line for `payload`.
    ///
    /// Title and message are always their own argv entries and are never
    /// run through a shell. No `--` separator is inserted before them, so a
    /// title such as `-u low` still reaches the notifier as an option-like
    /// word; the argv layout matches a plain
    /// `notify-send -u critical -t 20000 <title> <message>` call.
    pub fn build_command(&self, payload: &AlertPayload) -> NotifyCommand {
        let timeout = NOTIFY_TIMEOUT_MS.to_string();
        let notify_args = [
            "-u",
            Urgency::Critical.as_str(),
            "-t",
            timeout.as_str(),
            payload.title(),
            payload.message(),
        ];

        if self.needs_identity_switch() {
            let assignments = self
                .session
                .env_assignments()
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, value));

            return NotifyCommand::new(&self.config.identity_switch_command)
                .args(["-u", self.session.target_user(), "env"])
                .args(assignments)
                .arg(&self.config.notify_command)
                .args(notify_args);
        }

        self.session.env_assignments().into_iter().fold(
            NotifyCommand::new(&self.config.notify_command).args(notify_args),
            |cmd, (key, value)| cmd.env(key, value),
        )
    }

    /// Launch a notification for `payload` without waiting on it.
    ///
    /// # Returns
    /// `true` if the notifier process was started
    pub fn dispatch(&self, payload: &AlertPayload) -> bool {
        let command = self.build_command(payload);
        self.launcher.launch(&command)
    }

    /// Decode a raw request body and dispatch it
    pub fn dispatch_body(&self, body: &[u8]) -> bool {
        let payload = AlertPayload::from_body_with_title(body, &self.config.default_title);
        self.dispatch(&payload)
    }
}
