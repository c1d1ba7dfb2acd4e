//! Infrastructure layer module
//!
//! Configuration loading and logging setup used by the command-line entry
//! point. Storage adapters live in [`crate::adapters`].

pub mod config;
pub mod logging;
