//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! the HTTP endpoint and the main application runners.

pub mod app;
pub mod args;
pub mod presenter;
pub mod server;
pub mod signals;

// Re-export commonly used types
pub use app::{run_print_session, run_server, SessionReport, EXIT_ERROR, EXIT_SUCCESS};
pub use args::Cli;
pub use presenter::Presenter;
pub use server::{router, AlertServer, ServerError};
pub use signals::{ShutdownReason, ShutdownSignal};
