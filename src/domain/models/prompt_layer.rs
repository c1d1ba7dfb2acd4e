//! Prompt layers: the polymorphic content units of a drill.
//!
//! In memory a layer is always one of the concrete [`PromptLayer`] variants.
//! In storage it is a JSON object carrying a `layerType` discriminant next to
//! the variant's own fields. [`PromptLayer::rehydrate`] is the only way from
//! the stored form back to a typed layer.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::music::{Chord, Interval, IntervalDirection, Note};
use super::EpochMillis;
use crate::domain::errors::{LayerDefect, MalformedLayerError};

/// Name of the discriminant field in stored layers.
pub const LAYER_TYPE_FIELD: &str = "layerType";

/// Discriminant values, one per [`PromptLayer`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    NoteSequence,
    ChordSequence,
    IntervalSequence,
}

impl LayerKind {
    pub const ALL: [Self; 3] = [Self::NoteSequence, Self::ChordSequence, Self::IntervalSequence];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoteSequence => "noteSequence",
            Self::ChordSequence => "chordSequence",
            Self::IntervalSequence => "intervalSequence",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = LayerDefect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LayerDefect::UnknownDiscriminant(s.to_string()))
    }
}

/// Prompts single notes in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSequenceLayer {
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<EpochMillis>,
}

/// Prompts chord symbols in order, e.g. `Gbmaj7` then `Cm7b5`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSequenceLayer {
    pub chords: Vec<Chord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<EpochMillis>,
}

/// Prompts intervals, each sung or played from the previous prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSequenceLayer {
    pub intervals: Vec<Interval>,
    #[serde(default)]
    pub direction: IntervalDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<EpochMillis>,
}

/// One typed layer of drill content.
///
/// Serializes as the variant's fields plus `layerType`. There is no
/// `Deserialize` impl: stored layers come back through
/// [`PromptLayer::rehydrate`], which reports which layer failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layerType", rename_all = "camelCase")]
pub enum PromptLayer {
    NoteSequence(NoteSequenceLayer),
    ChordSequence(ChordSequenceLayer),
    IntervalSequence(IntervalSequenceLayer),
}

impl PromptLayer {
    pub const fn kind(&self) -> LayerKind {
        match self {
            Self::NoteSequence(_) => LayerKind::NoteSequence,
            Self::ChordSequence(_) => LayerKind::ChordSequence,
            Self::IntervalSequence(_) => LayerKind::IntervalSequence,
        }
    }

    /// Number of prompts this layer contributes per cycle.
    pub fn len(&self) -> usize {
        match self {
            Self::NoteSequence(layer) => layer.notes.len(),
            Self::ChordSequence(layer) => layer.chords.len(),
            Self::IntervalSequence(layer) => layer.intervals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a typed layer from its stored form at `promptLayers[index]`.
    pub fn rehydrate(index: usize, raw: Value) -> Result<Self, MalformedLayerError> {
        let malformed = |defect| MalformedLayerError { index, defect };

        let Value::Object(fields) = &raw else {
            return Err(malformed(LayerDefect::NotAnObject));
        };
        let kind = match fields.get(LAYER_TYPE_FIELD) {
            None | Some(Value::Null) => return Err(malformed(LayerDefect::MissingDiscriminant)),
            Some(Value::String(name)) => name.parse::<LayerKind>().map_err(malformed)?,
            Some(other) => {
                return Err(malformed(LayerDefect::UnknownDiscriminant(other.to_string())));
            }
        };

        let layer = match kind {
            LayerKind::NoteSequence => decode_fields(kind, raw).map(Self::NoteSequence),
            LayerKind::ChordSequence => decode_fields(kind, raw).map(Self::ChordSequence),
            LayerKind::IntervalSequence => decode_fields(kind, raw).map(Self::IntervalSequence),
        };
        layer.map_err(malformed)
    }

    /// Same musical content. Labels and generation timestamps are ignored.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoteSequence(a), Self::NoteSequence(b)) => {
                a.notes.len() == b.notes.len()
                    && a.notes
                        .iter()
                        .zip(&b.notes)
                        .all(|(x, y)| x.pitch_class() == y.pitch_class())
            }
            (Self::ChordSequence(a), Self::ChordSequence(b)) => {
                a.chords.len() == b.chords.len()
                    && a.chords.iter().zip(&b.chords).all(|(x, y)| x.sounds_like(y))
            }
            (Self::IntervalSequence(a), Self::IntervalSequence(b)) => {
                a.direction == b.direction && a.intervals == b.intervals
            }
            _ => false,
        }
    }
}

fn decode_fields<T: DeserializeOwned>(kind: LayerKind, raw: Value) -> Result<T, LayerDefect> {
    serde_json::from_value(raw).map_err(|e| LayerDefect::InvalidFields {
        kind,
        message: e.to_string(),
    })
}

impl From<NoteSequenceLayer> for PromptLayer {
    fn from(layer: NoteSequenceLayer) -> Self {
        Self::NoteSequence(layer)
    }
}

impl From<ChordSequenceLayer> for PromptLayer {
    fn from(layer: ChordSequenceLayer) -> Self {
        Self::ChordSequence(layer)
    }
}

impl From<IntervalSequenceLayer> for PromptLayer {
    fn from(layer: IntervalSequenceLayer) -> Self {
        Self::IntervalSequence(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::music::ChordQuality;
    use serde_json::json;

    fn chords(symbols: &[(&str, ChordQuality)]) -> ChordSequenceLayer {
        ChordSequenceLayer {
            chords: symbols
                .iter()
                .map(|(root, quality)| Chord::new(root.parse().unwrap(), *quality))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_serialized_tag_matches_kind() {
        let layers: Vec<PromptLayer> = vec![
            NoteSequenceLayer::default().into(),
            ChordSequenceLayer::default().into(),
            IntervalSequenceLayer::default().into(),
        ];
        for layer in layers {
            let value = serde_json::to_value(&layer).unwrap();
            assert_eq!(value[LAYER_TYPE_FIELD], layer.kind().as_str());
        }
    }

    #[test]
    fn test_rehydrate_chord_sequence() {
        let raw = json!({
            "layerType": "chordSequence",
            "chords": [{"root": "Gb", "quality": "maj7"}, {"root": "C", "quality": "m7b5"}],
            "generatedAt": 1_700_000_000_000_i64
        });

        let layer = PromptLayer::rehydrate(0, raw).unwrap();
        let PromptLayer::ChordSequence(layer) = layer else {
            panic!("expected chord sequence");
        };
        assert_eq!(layer.chords.len(), 2);
        assert_eq!(layer.chords[1].to_string(), "Cm7b5");
        assert_eq!(layer.generated_at, Some(1_700_000_000_000));
    }

    #[test]
    fn test_rehydrate_missing_discriminant() {
        let err = PromptLayer::rehydrate(3, json!({"notes": ["C"]})).unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.defect, LayerDefect::MissingDiscriminant);
    }

    #[test]
    fn test_rehydrate_unknown_discriminant() {
        let err = PromptLayer::rehydrate(1, json!({"layerType": "scale"})).unwrap_err();
        assert_eq!(err.defect, LayerDefect::UnknownDiscriminant("scale".to_string()));
    }

    #[test]
    fn test_rehydrate_rejects_non_objects_and_bad_fields() {
        let err = PromptLayer::rehydrate(0, json!("chordSequence")).unwrap_err();
        assert_eq!(err.defect, LayerDefect::NotAnObject);

        let err = PromptLayer::rehydrate(0, json!({"layerType": "noteSequence", "notes": ["H"]}))
            .unwrap_err();
        assert!(matches!(
            err.defect,
            LayerDefect::InvalidFields { kind: LayerKind::NoteSequence, .. }
        ));
    }

    #[test]
    fn test_equivalence_ignores_cosmetic_fields_and_spelling() {
        let a = PromptLayer::from(chords(&[("C#", ChordQuality::Minor7), ("F#", ChordQuality::Dominant7)]));
        let mut b_layer = chords(&[("Db", ChordQuality::Minor7), ("Gb", ChordQuality::Dominant7)]);
        b_layer.label = Some("ii-V in B".to_string());
        b_layer.generated_at = Some(42);
        let b = PromptLayer::from(b_layer);

        assert!(a.is_equivalent(&b));
        assert!(b.is_equivalent(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn test_equivalence_is_order_and_kind_sensitive() {
        let forward = PromptLayer::from(chords(&[("C", ChordQuality::Major), ("G", ChordQuality::Major)]));
        let reversed = PromptLayer::from(chords(&[("G", ChordQuality::Major), ("C", ChordQuality::Major)]));
        assert!(!forward.is_equivalent(&reversed));

        let notes = PromptLayer::from(NoteSequenceLayer::default());
        let empty_chords = PromptLayer::from(ChordSequenceLayer::default());
        assert!(!notes.is_equivalent(&empty_chords));
    }

    #[test]
    fn test_interval_equivalence_includes_direction() {
        let up = IntervalSequenceLayer {
            intervals: vec![Interval::try_from(7u8).unwrap()],
            direction: IntervalDirection::Ascending,
            ..Default::default()
        };
        let down = IntervalSequenceLayer {
            direction: IntervalDirection::Descending,
            ..up.clone()
        };
        assert!(PromptLayer::from(up.clone()).is_equivalent(&up.clone().into()));
        assert!(!PromptLayer::from(up).is_equivalent(&down.into()));
    }
}
