//! Desktop session domain module

mod context;
mod environment;

pub use context::{
    SessionContext, SessionSource, BUS_ADDRESS_VAR, DEFAULT_DISPLAY, DISPLAY_VAR,
};
pub use environment::{AmbientEnvironment, ElevationMarker, ElevationTool};

/// Uid assumed for the desktop user when no elevation marker names one
pub const DEFAULT_TARGET_UID: u32 = 1000;
