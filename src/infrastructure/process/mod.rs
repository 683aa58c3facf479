//! Process table infrastructure module

mod procfs;

pub use procfs::{parse_environ, ProcfsProcessTable};
