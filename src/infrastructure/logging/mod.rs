//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Human or JSON output on stderr
//! - Optional rolling JSON log file
//! - `RUST_LOG` overrides the configured level

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
