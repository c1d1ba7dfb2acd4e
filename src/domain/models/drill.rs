//! Drill and drill configuration models.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::prompt_layer::PromptLayer;
use crate::domain::errors::{DecodeError, MalformedLayerError, ValidationError};

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Suffix appended to the name of a duplicated drill.
pub const COPY_SUFFIX: &str = " copy";

/// Store-assigned drill identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillId(pub i64);

impl fmt::Display for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for DrillId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A persisted drill: one stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: DrillId,
    pub name: String,
    pub configuration: DrillConfiguration,
}

/// Everything a user configures about a drill.
///
/// `drill_id` is `None` until the configuration has been saved once; a present
/// id makes [`save`](crate::services::DrillRepository::save) replace that row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDrillConfiguration")]
pub struct DrillConfiguration {
    pub drill_id: Option<DrillId>,
    pub drill_name: String,
    pub beats_per_prompt: u32,
    pub tempo: u32,
    /// Playback order.
    pub prompt_layers: Vec<PromptLayer>,
}

impl DrillConfiguration {
    pub fn new(drill_name: impl Into<String>, beats_per_prompt: u32, tempo: u32) -> Self {
        Self {
            drill_id: None,
            drill_name: drill_name.into(),
            beats_per_prompt,
            tempo,
            prompt_layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: impl Into<PromptLayer>) -> Self {
        self.prompt_layers.push(layer.into());
        self
    }

    pub const fn with_id(mut self, id: DrillId) -> Self {
        self.drill_id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.drill_name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.beats_per_prompt == 0 {
            return Err(ValidationError::ZeroBeatsPerPrompt);
        }
        if self.tempo == 0 {
            return Err(ValidationError::ZeroTempo);
        }
        Ok(())
    }

    /// How long each prompt stays up at this tempo. Zero when tempo is zero.
    pub fn milliseconds_per_prompt(&self) -> u64 {
        if self.tempo == 0 {
            return 0;
        }
        u64::from(self.beats_per_prompt) * MILLIS_PER_MINUTE / u64::from(self.tempo)
    }

    /// Configuration for a new, unsaved copy of this drill.
    pub fn copy_for_duplicate(&self) -> Self {
        Self {
            drill_id: None,
            drill_name: format!("{}{COPY_SUFFIX}", self.drill_name),
            ..self.clone()
        }
    }

    /// Encode for the `configuration` column.
    pub fn to_storage_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the `configuration` column: parse the plain record, then
    /// rehydrate every layer into its concrete variant.
    pub fn from_storage_text(text: &str) -> Result<Self, DecodeError> {
        let raw: RawDrillConfiguration = serde_json::from_str(text)?;
        Ok(raw.rehydrate()?)
    }
}

/// Intermediate form of a stored configuration: layers are still untyped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrillConfiguration {
    #[serde(default)]
    drill_id: Option<DrillId>,
    drill_name: String,
    beats_per_prompt: u32,
    tempo: u32,
    #[serde(default)]
    prompt_layers: Vec<Value>,
}

impl RawDrillConfiguration {
    fn rehydrate(self) -> Result<DrillConfiguration, MalformedLayerError> {
        let prompt_layers = self
            .prompt_layers
            .into_iter()
            .enumerate()
            .map(|(index, raw)| PromptLayer::rehydrate(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DrillConfiguration {
            drill_id: self.drill_id,
            drill_name: self.drill_name,
            beats_per_prompt: self.beats_per_prompt,
            tempo: self.tempo,
            prompt_layers,
        })
    }
}

impl TryFrom<RawDrillConfiguration> for DrillConfiguration {
    type Error = MalformedLayerError;

    fn try_from(raw: RawDrillConfiguration) -> Result<Self, Self::Error> {
        raw.rehydrate()
    }
}
