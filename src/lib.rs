//! Build-time style sheets for Rust.
//!
//! This crate bundles the style engine ([`vcss`]) and the calc builder
//! ([`vcss_calc`]) behind one dependency, plus a file logger for build
//! scripts that want to see what the engine is doing.

pub mod log_init;

pub use log_init::{LoggerError, init_logger};
pub use vcss::*;
pub use vcss_calc;
