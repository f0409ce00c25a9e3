//! Logging setup.
//!
//! The engine itself only talks to the `log` facade; applications call
//! [`init_logging`] early in `main` to get `env_logger` output.

mod init;

pub use init::{init_logging, LoggingConfig};
