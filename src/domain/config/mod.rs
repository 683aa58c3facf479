//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, BIND_ADDR, DEFAULT_IDENTITY_SWITCH_COMMAND, DEFAULT_NOTIFY_COMMAND, DEFAULT_PORT,
};
