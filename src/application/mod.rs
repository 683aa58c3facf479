//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod dispatch_alert;
pub mod ports;
pub mod resolve_session;

// Re-export use cases
pub use dispatch_alert::{DispatchAlertUseCase, DispatchConfig};
pub use resolve_session::{ResolveError, ResolveSessionUseCase, TargetIdentity};
