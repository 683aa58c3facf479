//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod launcher;
pub mod process_table;
pub mod user_directory;

// Re-export common types
pub use launcher::Launcher;
pub use process_table::{DiscoveryError, ProbeError, ProcessRecord, ProcessTable};
pub use user_directory::UserDirectory;
