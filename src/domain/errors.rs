//! Domain errors for the drill persistence and analytics core.
//!
//! Storage failures are converted into [`StorageError`] at the adapter
//! boundary; the operation-specific wrappers ([`SaveError`], [`LoadError`],
//! [`DeleteError`]) carry that cause up to the caller.

use thiserror::Error;

use crate::domain::models::{Drill, DrillId, LayerKind};

/// Failures talking to the backing store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be opened or migrated.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A statement failed against an open store.
    #[error("Query failed: {0}")]
    Query(String),

    /// A stored value could not be mapped back into the domain.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Lookup miss on a drill identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Drill not found: {id}")]
pub struct NotFoundError {
    pub id: DrillId,
}

/// A configuration that must not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Drill name cannot be empty")]
    EmptyName,

    #[error("beatsPerPrompt must be positive")]
    ZeroBeatsPerPrompt,

    #[error("Tempo must be positive")]
    ZeroTempo,
}

/// What was wrong with a single stored prompt layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerDefect {
    #[error("layer is not a JSON object")]
    NotAnObject,

    #[error("missing layerType discriminant")]
    MissingDiscriminant,

    #[error("unknown layerType {0:?}")]
    UnknownDiscriminant(String),

    #[error("invalid {kind} fields: {message}")]
    InvalidFields { kind: LayerKind, message: String },
}

/// Rehydration failure on `promptLayers[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed prompt layer at index {index}: {defect}")]
pub struct MalformedLayerError {
    pub index: usize,
    pub defect: LayerDefect,
}

/// Failure turning storage text back into a `DrillConfiguration`.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not a well-formed configuration record.
    #[error("Invalid configuration text: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error(transparent)]
    MalformedLayer(#[from] MalformedLayerError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Invalid drill configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to encode drill configuration: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Reading the source drill for a copy failed.
    #[error("Failed to load source drill: {0}")]
    Source(#[source] Box<LoadError>),

    #[error("Failed to save drill: {0}")]
    Storage(#[from] StorageError),

    /// The write succeeded but the drill list could not be reloaded.
    #[error("Drill {} saved but reload failed: {source}", .drill.id)]
    Reload {
        drill: Box<Drill>,
        #[source]
        source: Box<LoadError>,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Failed to decode drill {id}: {source}")]
    Decode {
        id: DrillId,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to load drills: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Failed to delete drill: {0}")]
    Storage(#[from] StorageError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl LoadError {
    /// True when the failure is an identifier miss rather than an access failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<LoadError> for SaveError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(e) => Self::NotFound(e),
            LoadError::Storage(e) => Self::Storage(e),
            other @ LoadError::Decode { .. } => Self::Source(Box::new(other)),
        }
    }
}
