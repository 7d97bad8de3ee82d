//! Logging utilities.
//!
//! The core reports through the `log` facade only. Hosts that want console
//! output call `init_logging` once at startup; hosts with their own logger
//! (logcat, os_log) install it instead and skip this module.

mod init;

pub use init::{init_logging, LoggingConfig};
