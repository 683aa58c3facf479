//! Process table port interface
//!
//! Session discovery reads the process table of the host. Scanning races
//! against processes starting and exiting, so the per-process errors are
//! split into the ones a scan expects and skips ([`ProbeError::Vanished`],
//! [`ProbeError::PermissionDenied`]) and the ones that mean the table itself
//! cannot be trusted ([`ProbeError::Unexpected`]).

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Error inspecting a single process
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Process {pid} exited during the scan")]
    Vanished { pid: u32 },

    #[error("Permission denied inspecting process {pid}")]
    PermissionDenied { pid: u32 },

    #[error("Failed to inspect process {pid}: {message}")]
    Unexpected { pid: u32, message: String },
}

impl ProbeError {
    /// Whether a scan should skip this process and carry on
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Vanished { .. } | Self::PermissionDenied { .. })
    }
}

/// Error listing the process table as a whole
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Process table unavailable: {0}")]
    Unavailable(String),
}

/// Owner and environment of one inspected process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub uid: u32,
    pub env: HashMap<String, String>,
}

impl ProcessRecord {
    /// Look up a non-empty environment variable
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Port for reading the host's process table
#[async_trait]
pub trait ProcessTable: Send + Sync {
    /// List live process ids in ascending order.
    async fn pids(&self) -> Result<Vec<u32>, DiscoveryError>;

    /// Numeric id of the user owning `pid`.
    async fn owner_uid(&self, pid: u32) -> Result<u32, ProbeError>;

    /// Environment `pid` was started with.
    ///
    /// Entries that are not `KEY=VALUE` or not valid UTF-8 are dropped.
    async fn environ(&self, pid: u32) -> Result<HashMap<String, String>, ProbeError>;
}

/// Blanket implementation for boxed process tables
#[async_trait]
impl ProcessTable for Box<dyn ProcessTable> {
    async fn pids(&self) -> Result<Vec<u32>, DiscoveryError> {
        self.as_ref().pids().await
    }

    async fn owner_uid(&self, pid: u32) -> Result<u32, ProbeError> {
        self.as_ref().owner_uid(pid).await
    }

    async fn environ(&self, pid: u32) -> Result<HashMap<String, String>, ProbeError> {
        self.as_ref().environ(pid).await
    }
}
