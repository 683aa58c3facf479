//! CLI argument definitions using Clap

use clap::Parser;

use crate::domain::config::AppConfig;

/// webhook-notify - alert webhooks to desktop notifications
#[derive(Parser, Debug)]
#[command(name = "webhook-notify")]
#[command(version)]
#[command(about = "Receive alert webhooks on loopback and show them as desktop notifications")]
#[command(long_about = None)]
pub struct Cli {
    /// Port to listen on (bound to 127.0.0.1, default 9000)
    #[arg(value_name = "PORT")]
    pub port: Option<u16>,

    /// Notifier program to invoke
    #[arg(long, value_name = "PROGRAM", env = "WEBHOOK_NOTIFY_COMMAND")]
    pub notify_command: Option<String>,

    /// Program used to run the notifier as the desktop user when root
    #[arg(long, value_name = "PROGRAM", env = "WEBHOOK_NOTIFY_SWITCH_COMMAND")]
    pub identity_switch_command: Option<String>,

    /// Title for alerts that carry none
    #[arg(long, value_name = "TITLE", env = "WEBHOOK_NOTIFY_DEFAULT_TITLE")]
    pub default_title: Option<String>,

    /// Uid of the desktop user when no sudo/pkexec/doas marker is present
    #[arg(long, value_name = "UID", env = "WEBHOOK_NOTIFY_FALLBACK_UID")]
    pub fallback_uid: Option<u32>,

    /// Resolve the desktop session, print it, and exit
    #[arg(long)]
    pub print_session: bool,

    /// Print the session report as JSON (with --print-session)
    #[arg(long, requires = "print_session")]
    pub json: bool,
}

impl Cli {
    /// Configuration layer contributed by the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            port: self.port,
            notify_command: self.notify_command.clone(),
            identity_switch_command: self.identity_switch_command.clone(),
            fallback_uid: self.fallback_uid,
            default_title: self.default_title.clone(),
        }
    }
}
