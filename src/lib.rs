//! Noteprompter - drill library and practice log
//!
//! Persistence and analytics core of a music-practice trainer: drill
//! configurations built from typed prompt layers, near-duplicate detection,
//! and an append-only session log with per-drill time reports.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, error taxonomy, storage ports
//! - **Adapters** (`adapters`): `SQLite` implementations of the ports
//! - **Service Layer** (`services`): drill repository, session store, similarity
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use noteprompter::adapters::sqlite::{initialize_database, SqliteDrillStore};
//! use noteprompter::{DrillConfiguration, DrillRepository};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pool = initialize_database("sqlite:drills.db", None).await?;
//! let repo = DrillRepository::new(Arc::new(SqliteDrillStore::new(pool)));
//! let drill = repo.save(DrillConfiguration::new("Circle of fourths", 4, 100)).await?;
//! println!("saved drill {}", drill.id);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{
    DecodeError, DeleteError, LoadError, NotFoundError, SaveError, StorageError, ValidationError,
};
pub use domain::models::{
    Config, Drill, DrillConfiguration, DrillId, DrillStatsReport, PromptLayer, Session, SessionId,
    SessionInput, StatsQuery,
};
pub use infrastructure::config::ConfigLoader;
pub use infrastructure::logging::LoggerImpl;
pub use services::{find_similar, is_similar, DrillRepository, LoadReport, SessionStore};
