pub mod drill_repository;
pub mod session_store;
pub mod similarity;

pub use drill_repository::{DrillRepository, LoadReport, SkippedRow};
pub use session_store::SessionStore;
pub use similarity::{find_similar, is_similar};
