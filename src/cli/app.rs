//! App runners for serve and session-report modes

use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::application::{DispatchAlertUseCase, DispatchConfig, ResolveSessionUseCase};
use crate::domain::config::AppConfig;
use crate::domain::session::{AmbientEnvironment, SessionContext};
use crate::infrastructure::{
    running_as_superuser, NixUserDirectory, ProcfsProcessTable, TokioProcessLauncher,
};

use super::presenter::Presenter;
use super::server::{router, AlertServer};
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Resolve the desktop session once, reporting problems as warnings
pub async fn resolve_session(config: &AppConfig, presenter: &Presenter) -> SessionContext {
    let use_case = ResolveSessionUseCase::new(ProcfsProcessTable::new(), NixUserDirectory::new())
        .with_fallback_uid(config.fallback_uid_or_default());

    let (session, error) = use_case
        .execute_or_fallback(&AmbientEnvironment::from_process())
        .await;

    if let Some(e) = error {
        presenter.warn(&format!("{}; using defaults", e));
    }
    if !session.has_bus_address() {
        presenter.warn("No session bus found; notifications may not be delivered");
    }

    session
}

/// Resolved session as printed by `--print-session`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionReport {
    pub target_user: Option<String>,
    pub target_uid: Option<u32>,
    pub display: String,
    pub bus_address: Option<String>,
    pub source: String,
}

impl From<&SessionContext> for SessionReport {
    fn from(session: &SessionContext) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Self {
            target_user: non_empty(session.target_user()),
            target_uid: session.target_uid(),
            display: session.display_address().to_string(),
            bus_address: non_empty(session.bus_address()),
            source: session.source().to_string(),
        }
    }
}

/// Print the resolved session and exit
pub async fn run_print_session(config: AppConfig, json: bool) -> ExitCode {
    let presenter = Presenter::new();
    let session = resolve_session(&config, &presenter).await;
    let report = SessionReport::from(&session);

    if json {
        return match serde_json::to_string_pretty(&report) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&format!("Failed to encode report: {}", e));
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let uid = report.target_uid.map(|uid| uid.to_string());
    let unset = |value: Option<&str>| value.unwrap_or("(not set)").to_string();

    presenter.key_value("target_user", &unset(report.target_user.as_deref()));
    presenter.key_value("target_uid", &unset(uid.as_deref()));
    presenter.key_value("display", &report.display);
    presenter.key_value("bus_address", &unset(report.bus_address.as_deref()));
    presenter.key_value("source", &report.source);

    ExitCode::from(EXIT_SUCCESS)
}

/// Resolve the session, then serve alert webhooks until SIGINT/SIGTERM
pub async fn run_server(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let session = resolve_session(&config, &presenter).await;
    presenter.info(&format!(
        "Session: user={} display={} source={}",
        presenter.or_unset(session.target_user()),
        session.display_address(),
        session.source()
    ));

    let dispatch_config = DispatchConfig {
        notify_command: config.notify_command_or_default().to_string(),
        identity_switch_command: config.identity_switch_command_or_default().to_string(),
        default_title: config.default_title_or_default().to_string(),
        running_as_superuser: running_as_superuser(),
    };
    let dispatcher = Arc::new(DispatchAlertUseCase::new(
        TokioProcessLauncher::new(),
        Arc::new(session),
        dispatch_config,
    ));

    let signals = match ShutdownSignal::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut server = AlertServer::new(config.listen_addr());
    if let Err(e) = server.bind().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    match server.local_addr() {
        Ok(addr) => presenter.success(&format!("Listening on http://{}", addr)),
        Err(e) => presenter.warn(&e.to_string()),
    }
    presenter.server_status("Waiting for alerts (SIGINT/SIGTERM: exit)");

    let (reason_tx, mut reason_rx) = oneshot::channel();
    let shutdown = async move {
        if let Some(reason) = signals.wait().await {
            let _ = reason_tx.send(reason);
        }
    };

    match server.run(router(dispatcher), shutdown).await {
        Ok(()) => {
            match reason_rx.try_recv() {
                Ok(reason) => presenter.server_status(&format!("Stopped ({})", reason)),
                Err(_) => presenter.server_status("Stopped"),
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
