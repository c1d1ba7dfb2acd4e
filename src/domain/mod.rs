//! Domain layer for the drill trainer core
//!
//! Drill and session models, the error taxonomy, and the storage ports that
//! adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{
    DecodeError, DeleteError, LoadError, MalformedLayerError, NotFoundError, SaveError,
    StorageError, ValidationError,
};
