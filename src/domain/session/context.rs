//! Session context value object

use std::fmt;

/// Display used when none could be discovered
pub const DEFAULT_DISPLAY: &str = ":0";

/// Environment variable carrying the session bus address
pub const BUS_ADDRESS_VAR: &str = "DBUS_SESSION_BUS_ADDRESS";

/// Environment variable carrying the X display
pub const DISPLAY_VAR: &str = "DISPLAY";

/// Where a session context came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSource {
    /// The process already carried a bus address
    Ambient,
    /// Copied from the environment of a process owned by the target user
    ProcessScan { pid: u32 },
    /// Nothing found, defaults in use
    #[default]
    Fallback,
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambient => write!(f, "ambient environment"),
            Self::ProcessScan { pid } => write!(f, "process {}", pid),
            Self::Fallback => write!(f, "defaults"),
        }
    }
}

/// Addressing needed to reach the desktop user's notification bus.
///
/// Resolved once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    target_user: String,
    target_uid: Option<u32>,
    display_address: String,
    bus_address: String,
    source: SessionSource,
}

impl SessionContext {
    /// Create a session context
    pub fn new(
        target_user: impl Into<String>,
        target_uid: Option<u32>,
        display_address: impl Into<String>,
        bus_address: impl Into<String>,
        source: SessionSource,
    ) -> Self {
        Self {
            target_user: target_user.into(),
            target_uid,
            display_address: display_address.into(),
            bus_address: bus_address.into(),
            source,
        }
    }

    /// Context used when resolution found nothing
    pub fn fallback() -> Self {
        Self::new("", None, DEFAULT_DISPLAY, "", SessionSource::Fallback)
    }

    /// Login name of the desktop user (empty if unresolved)
    pub fn target_user(&self) -> &str {
        &self.target_user
    }

    /// Numeric id of the desktop user, if known
    pub fn target_uid(&self) -> Option<u32> {
        self.target_uid
    }

    pub fn display_address(&self) -> &str {
        &self.display_address
    }

    /// Session bus address (empty if not discovered)
    pub fn bus_address(&self) -> &str {
        &self.bus_address
    }

    pub fn source(&self) -> SessionSource {
        self.source
    }

    /// Whether a target user was resolved
    pub fn has_target_user(&self) -> bool {
        !self.target_user.is_empty()
    }

    /// Whether a bus address was discovered
    pub fn has_bus_address(&self) -> bool {
        !self.bus_address.is_empty()
    }

    /// Environment assignments a notifier needs to reach this session.
    ///
    /// The bus variable is omitted when unknown so the notifier can fall back
    /// to its own discovery.
    pub fn env_assignments(&self) -> Vec<(String, String)> {
        let mut vars = vec![(DISPLAY_VAR.to_string(), self.display_address.clone())];
        if self.has_bus_address() {
            vars.push((BUS_ADDRESS_VAR.to_string(), self.bus_address.clone()));
        }
        vars
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::fallback()
    }
}
