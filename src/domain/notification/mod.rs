//! Notification domain module

mod command;

pub use command::{NotifyCommand, Urgency, NOTIFY_TIMEOUT_MS};
