//! Runtime module — CLI lifecycle: boot, run, shutdown.

pub mod boot;
pub mod cli;
pub mod error;
pub mod run;
