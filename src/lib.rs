//! webhook-notify - alert webhooks as desktop notifications
//!
//! Receives JSON alerts over HTTP on the loopback interface and shows each
//! one as a critical desktop notification through `notify-send`, even when
//! the receiver itself runs as root from a service manager.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session context, alert payloads, notifier commands, config
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (procfs, passwd, process spawning)
//! - **CLI**: Argument parsing, the HTTP endpoint, and signal handling

#[cfg(not(unix))]
compile_error!("webhook-notify reads /proc and switches user identities; only Unix is supported");

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
