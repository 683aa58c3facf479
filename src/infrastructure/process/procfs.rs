//! /proc process table adapter

use std::collections::HashMap;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nix::errno::Errno;
use tokio::fs;

use crate::application::ports::{DiscoveryError, ProbeError, ProcessTable};

/// Default procfs mount point
const DEFAULT_PROC_ROOT: &str = "/proc";

/// Process table backed by the Linux procfs
pub struct ProcfsProcessTable {
    root: PathBuf,
}

impl ProcfsProcessTable {
    /// Create a process table reading `/proc`
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_PROC_ROOT),
        }
    }

    /// Create with a custom procfs root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the procfs root
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_dir(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl Default for ProcfsProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessTable for ProcfsProcessTable {
    async fn pids(&self) -> Result<Vec<u32>, DiscoveryError> {
        let unavailable =
            |e: io::Error| DiscoveryError::Unavailable(format!("{}: {}", self.root.display(), e));

        let mut entries = fs::read_dir(&self.root).await.map_err(unavailable)?;
        let mut pids = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            if let Some(pid) = entry.file_name().to_str().and_then(|n| n.parse::<u32>().ok()) {
                pids.push(pid);
            }
        }

        pids.sort_unstable();
        Ok(pids)
    }

    async fn owner_uid(&self, pid: u32) -> Result<u32, ProbeError> {
        let meta = fs::metadata(self.pid_dir(pid))
            .await
            .map_err(|e| probe_error(pid, e))?;
        Ok(meta.uid())
    }

    async fn environ(&self, pid: u32) -> Result<HashMap<String, String>, ProbeError> {
        let bytes = fs::read(self.pid_dir(pid).join("environ"))
            .await
            .map_err(|e| probe_error(pid, e))?;
        Ok(parse_environ(&bytes))
    }
}

/// Classify an I/O error raised while reading one process
fn probe_error(pid: u32, e: io::Error) -> ProbeError {
    match e.kind() {
        io::ErrorKind::NotFound => ProbeError::Vanished { pid },
        io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied { pid },
        // Reading a reaped process's files can fail with ESRCH
        _ if e.raw_os_error() == Some(Errno::ESRCH as i32) => ProbeError::Vanished { pid },
        _ => ProbeError::Unexpected {
            pid,
            message: e.to_string(),
        },
    }
}

/// Parse a NUL-separated `KEY=VALUE` block
pub fn parse_environ(bytes: &[u8]) -> HashMap<String, String> {
    bytes
        .split(|b| *b == 0)
        .filter_map(|entry| std::str::from_utf8(entry).ok())
        .filter_map(|entry| entry.split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
