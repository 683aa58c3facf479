//! Launcher infrastructure module

mod tokio_process;

pub use tokio_process::TokioProcessLauncher;
