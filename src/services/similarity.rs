//! Near-duplicate detection over drill configurations.
//!
//! Two drills are similar when their prompt layers line up one-to-one and
//! each pair is [equivalent](PromptLayer::is_equivalent). Names, tempo and
//! beats-per-prompt do not take part.

use crate::domain::models::{Drill, DrillConfiguration, DrillId, PromptLayer};

/// Symmetric and reflexive.
pub fn is_similar(a: &DrillConfiguration, b: &DrillConfiguration) -> bool {
    layers_similar(&a.prompt_layers, &b.prompt_layers)
}

fn layers_similar(a: &[PromptLayer], b: &[PromptLayer]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_equivalent(y))
}

/// Every drill in `corpus` similar to `query`, in corpus order.
///
/// The corpus entry with the query's own identifier is skipped.
pub fn find_similar(query: &DrillConfiguration, corpus: &[Drill]) -> Vec<DrillId> {
    corpus
        .iter()
        .filter(|drill| query.drill_id != Some(drill.id))
        .filter(|drill| is_similar(query, &drill.configuration))
        .map(|drill| drill.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        Chord, ChordQuality, ChordSequenceLayer, Interval, IntervalSequenceLayer, NoteSequenceLayer,
    };

    fn chord_drill(name: &str, roots: &[&str]) -> DrillConfiguration {
        DrillConfiguration::new(name, 4, 100).with_layer(ChordSequenceLayer {
            chords: roots
                .iter()
                .map(|r| Chord::new(r.parse().unwrap(), ChordQuality::Dominant7))
                .collect(),
            ..Default::default()
        })
    }

    fn stored(id: i64, config: DrillConfiguration) -> Drill {
        let config = config.with_id(DrillId(id));
        Drill {
            id: DrillId(id),
            name: config.drill_name.clone(),
            configuration: config,
        }
    }

    #[test]
    fn test_similar_ignores_name_and_tempo() {
        let a = chord_drill("Blues", &["F", "Bb", "C"]);
        let mut b = chord_drill("Blues in F", &["F", "A#", "C"]);
        b.tempo = 60;
        b.beats_per_prompt = 8;
        assert!(is_similar(&a, &b));
        assert!(is_similar(&b, &a));
        assert!(is_similar(&a, &a));
    }

    #[test]
    fn test_layer_count_must_match() {
        let a = chord_drill("x", &["C"]);
        let b = chord_drill("x", &["C"]).with_layer(NoteSequenceLayer::default());
        assert!(!is_similar(&a, &b));
        assert!(!is_similar(&b, &a));
    }

    #[test]
    fn test_layer_order_matters() {
        let intervals = IntervalSequenceLayer {
            intervals: vec![Interval::try_from(4u8).unwrap()],
            ..Default::default()
        };
        let notes = NoteSequenceLayer {
            notes: vec!["E".parse().unwrap()],
            ..Default::default()
        };
        let a = DrillConfiguration::new("a", 1, 60)
            .with_layer(intervals.clone())
            .with_layer(notes.clone());
        let b = DrillConfiguration::new("b", 1, 60).with_layer(notes).with_layer(intervals);
        assert!(!is_similar(&a, &b));
    }

    #[test]
    fn test_empty_drills_are_similar() {
        let a = DrillConfiguration::new("a", 1, 60);
        let b = DrillConfiguration::new("b", 2, 90);
        assert!(is_similar(&a, &b));
    }

    #[test]
    fn test_find_similar_reports_every_match_in_order() {
        let corpus = vec![
            stored(1, chord_drill("one", &["C", "F"])),
            stored(2, chord_drill("two", &["D", "G"])),
            stored(3, chord_drill("three", &["B#", "E#"])),
            stored(4, chord_drill("four", &["C", "F"])),
        ];
        let query = chord_drill("draft", &["C", "F"]);

        assert_eq!(find_similar(&query, &corpus), vec![DrillId(1), DrillId(3), DrillId(4)]);
    }

    #[test]
    fn test_find_similar_excludes_self() {
        let corpus = vec![
            stored(1, chord_drill("one", &["C"])),
            stored(2, chord_drill("two", &["C"])),
        ];
        let query = corpus[0].configuration.clone();

        assert_eq!(find_similar(&query, &corpus), vec![DrillId(2)]);
    }

    #[test]
    fn test_find_similar_on_empty_corpus() {
        assert!(find_similar(&chord_drill("x", &["C"]), &[]).is_empty());
    }
}
