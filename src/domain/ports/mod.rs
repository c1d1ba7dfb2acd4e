//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that storage adapters implement:
//! - DrillStore: rows of the `Drills` table
//! - SessionRepository: the append-only `Sessions` log

pub mod drill_store;
pub mod session_repository;

pub use drill_store::{DrillRow, DrillStore};
pub use session_repository::SessionRepository;
