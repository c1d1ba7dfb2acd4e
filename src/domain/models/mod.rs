pub mod config;
pub mod drill;
pub mod music;
pub mod prompt_layer;
pub mod session;

/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

pub use config::{Config, DatabaseConfig};
pub use drill::{Drill, DrillConfiguration, DrillId, COPY_SUFFIX};
pub use music::{Accidental, Chord, ChordQuality, Interval, IntervalDirection, Letter, Note};
pub use prompt_layer::{
    ChordSequenceLayer, IntervalSequenceLayer, LayerKind, NoteSequenceLayer, PromptLayer,
    LAYER_TYPE_FIELD,
};
pub use session::{
    aggregate_sessions, DrillStat, DrillStatsReport, Session, SessionId, SessionInput, StatsQuery,
};
