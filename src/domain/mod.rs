//! Domain layer - Core business logic
//!
//! Contains value objects for sessions, alerts, notifier commands
//! and configuration. This layer has no dependencies on external systems.

pub mod alert;
pub mod config;
pub mod notification;
pub mod session;

// Re-export common types
pub use alert::AlertPayload;
pub use config::AppConfig;
pub use notification::{NotifyCommand, Urgency};
pub use session::{AmbientEnvironment, ElevationMarker, SessionContext, SessionSource};
