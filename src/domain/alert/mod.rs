//! Alert domain module

mod payload;

pub use payload::{decode_body, AlertPayload, DEFAULT_TITLE, RAW_BODY_KEY};
