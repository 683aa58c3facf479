//! System user database adapter

use nix::unistd::{geteuid, Uid, User};

use crate::application::ports::UserDirectory;

/// User lookups through the system passwd database (NSS)
pub struct NixUserDirectory;

impl NixUserDirectory {
    /// Create a new user directory
    pub fn new() -> Self {
        Self
    }
}

impl Default for NixUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory for NixUserDirectory {
    fn uid_of(&self, name: &str) -> Option<u32> {
        User::from_name(name).ok().flatten().map(|u| u.uid.as_raw())
    }

    fn name_of(&self, uid: u32) -> Option<String> {
        User::from_uid(Uid::from_raw(uid))
            .ok()
            .flatten()
            .map(|u| u.name)
    }
}

/// Whether this process runs with an effective uid of 0
pub fn running_as_superuser() -> bool {
    geteuid().is_root()
}
