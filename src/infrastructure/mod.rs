//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with procfs, the passwd database and process spawning.

pub mod launcher;
pub mod process;
pub mod users;

// Re-export adapters
pub use launcher::TokioProcessLauncher;
pub use process::ProcfsProcessTable;
pub use users::{running_as_superuser, NixUserDirectory};
