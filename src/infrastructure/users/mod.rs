//! User database infrastructure module

mod nix_users;

pub use nix_users::{running_as_superuser, NixUserDirectory};
