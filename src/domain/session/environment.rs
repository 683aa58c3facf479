//! Ambient environment snapshot and privilege-escalation markers

use std::collections::HashMap;
use std::fmt;

use super::context::{BUS_ADDRESS_VAR, DISPLAY_VAR};

/// Tool used to start this process with elevated privileges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationTool {
    Sudo,
    Pkexec,
    Doas,
}

impl ElevationTool {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sudo => "sudo",
            Self::Pkexec => "pkexec",
            Self::Doas => "doas",
        }
    }
}

impl fmt::Display for ElevationTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of the user who invoked the elevation tool.
///
/// Each tool records a different subset: sudo leaves both name and uid,
/// pkexec only the uid, doas only the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationMarker {
    pub tool: ElevationTool,
    pub user: Option<String>,
    pub uid: Option<u32>,
}

impl ElevationMarker {
    /// Detect a marker from environment variables.
    ///
    /// sudo wins over pkexec, pkexec over doas.
    pub fn detect(vars: &HashMap<String, String>) -> Option<Self> {
        let non_empty = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let uid = |key: &str| non_empty(key).and_then(|v| v.parse::<u32>().ok());

        let sudo_user = non_empty("SUDO_USER");
        let sudo_uid = uid("SUDO_UID");
        if sudo_user.is_some() || sudo_uid.is_some() {
            return Some(Self {
                tool: ElevationTool::Sudo,
                user: sudo_user,
                uid: sudo_uid,
            });
        }

        if let Some(pkexec_uid) = uid("PKEXEC_UID") {
            return Some(Self {
                tool: ElevationTool::Pkexec,
                user: None,
                uid: Some(pkexec_uid),
            });
        }

        non_empty("DOAS_USER").map(|user| Self {
            tool: ElevationTool::Doas,
            user: Some(user),
            uid: None,
        })
    }
}

/// The parts of this process's environment the session resolver cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEnvironment {
    pub bus_address: Option<String>,
    pub display: Option<String>,
    pub elevation: Option<ElevationMarker>,
}

impl AmbientEnvironment {
    /// Build a snapshot from `(key, value)` pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let non_empty = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            bus_address: non_empty(BUS_ADDRESS_VAR),
            display: non_empty(DISPLAY_VAR),
            elevation: ElevationMarker::detect(&vars),
        }
    }

    /// Snapshot of the current process environment
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }
}
