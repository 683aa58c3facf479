//! webhook-notify entry point

use std::process::ExitCode;

use clap::Parser;

use webhook_notify::cli::{run_print_session, run_server, Cli};
use webhook_notify::domain::config::AppConfig;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Command line wins over built-in defaults
    let config = AppConfig::defaults().merge(cli.to_config());

    if cli.print_session {
        run_print_session(config, cli.json).await
    } else {
        run_server(config).await
    }
}
