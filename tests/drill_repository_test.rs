mod helpers;

use helpers::database::{insert_raw_drill, setup_drill_repository, teardown_test_db};
use noteprompter::domain::models::{
    Chord, ChordQuality, ChordSequenceLayer, Interval, IntervalDirection, IntervalSequenceLayer,
    NoteSequenceLayer,
};
use noteprompter::{DecodeError, DeleteError, DrillConfiguration, DrillId, LoadError, SaveError};

fn arpeggio_drill(name: &str) -> DrillConfiguration {
    DrillConfiguration::new(name, 2, 96)
        .with_layer(NoteSequenceLayer {
            notes: ["C", "E", "G", "Bb"].iter().map(|n| n.parse().unwrap()).collect(),
            label: Some("C7 tones".to_string()),
            generated_at: Some(1_700_000_000_000),
        })
        .with_layer(IntervalSequenceLayer {
            intervals: vec![Interval::try_from(4u8).unwrap(), Interval::try_from(3u8).unwrap()],
            direction: IntervalDirection::Descending,
            ..Default::default()
        })
}

#[tokio::test]
async fn test_save_and_reload_preserves_every_field() {
    let (repo, pool) = setup_drill_repository().await;

    let saved = repo.save(arpeggio_drill("C7 arpeggio")).await.unwrap();
    let loaded = repo.load_by_id(saved.id).await.unwrap();

    assert_eq!(loaded.name, "C7 arpeggio");
    assert_eq!(loaded.configuration.drill_id, Some(saved.id));
    assert_eq!(
        loaded.configuration.prompt_layers,
        arpeggio_drill("").prompt_layers
    );
    assert_eq!(loaded.configuration.milliseconds_per_prompt(), 1250);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_upsert_keeps_identity_and_replaces_content() {
    let (repo, pool) = setup_drill_repository().await;

    let saved = repo.save(arpeggio_drill("v1")).await.unwrap();
    let mut edited = saved.configuration.clone();
    edited.drill_name = "v2".to_string();
    edited.tempo = 144;
    edited.prompt_layers.truncate(1);

    let resaved = repo.save(edited).await.unwrap();
    assert_eq!(resaved.id, saved.id);

    let all = repo.load_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "v2");
    assert_eq!(all[0].configuration.tempo, 144);
    assert_eq!(all[0].configuration.prompt_layers.len(), 1);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_save_with_unknown_id_creates_that_row() {
    let (repo, pool) = setup_drill_repository().await;

    let saved = repo
        .save(arpeggio_drill("restored").with_id(DrillId(42)))
        .await
        .unwrap();
    assert_eq!(saved.id, DrillId(42));
    assert_eq!(repo.load_by_id(DrillId(42)).await.unwrap().name, "restored");

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (repo, pool) = setup_drill_repository().await;

    let first = repo.save(arpeggio_drill("a")).await.unwrap();
    repo.delete_by_id(first.id).await.unwrap();
    let second = repo.save(arpeggio_drill("b")).await.unwrap();

    assert!(second.id > first.id);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_load_by_id_missing() {
    let (repo, pool) = setup_drill_repository().await;

    let err = repo.load_by_id(DrillId(999)).await.unwrap_err();
    assert!(matches!(err, LoadError::NotFound(ref e) if e.id == DrillId(999)));
    assert_eq!(err.to_string(), "Drill not found: 999");

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_load_all_skips_and_reports_malformed_rows() {
    let (repo, pool) = setup_drill_repository().await;

    let good = repo.save(arpeggio_drill("good")).await.unwrap();
    let missing_tag = insert_raw_drill(
        &pool,
        "missing tag",
        r#"{"drillName":"missing tag","beatsPerPrompt":4,"tempo":90,"promptLayers":[{"notes":["C"]}]}"#,
    )
    .await;
    let bad_fields = insert_raw_drill(
        &pool,
        "bad fields",
        r#"{"drillName":"bad fields","beatsPerPrompt":4,"tempo":90,"promptLayers":[{"layerType":"chordSequence","chords":[{"root":"H","quality":"maj"}]}]}"#,
    )
    .await;
    let later = repo.save(arpeggio_drill("later")).await.unwrap();

    let report = repo.load_all_with_report().await.unwrap();
    let loaded: Vec<_> = report.drills.iter().map(|d| d.id).collect();
    assert_eq!(loaded, vec![good.id, later.id]);

    let skipped: Vec<_> = report.skipped.iter().map(|s| s.id.0).collect();
    assert_eq!(skipped, vec![missing_tag, bad_fields]);
    for row in &report.skipped {
        assert!(matches!(row.error, DecodeError::MalformedLayer(ref e) if e.index == 0));
    }

    assert_eq!(repo.load_all().await.unwrap().len(), 2);
    assert_eq!(repo.cached_drills().await.len(), 2);

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_load_by_id_reports_malformed_row() {
    let (repo, pool) = setup_drill_repository().await;

    let id = insert_raw_drill(&pool, "broken", "{").await;
    let err = repo.load_by_id(DrillId(id)).await.unwrap_err();
    assert!(matches!(err, LoadError::Decode { id: got, source: DecodeError::Syntax(_) } if got == DrillId(id)));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_stored_drill_id_is_overridden_by_row_id() {
    let (repo, pool) = setup_drill_repository().await;

    let id = insert_raw_drill(
        &pool,
        "imported",
        r#"{"drillId":7,"drillName":"imported","beatsPerPrompt":1,"tempo":60}"#,
    )
    .await;
    let drill = repo.load_by_id(DrillId(id)).await.unwrap();
    assert_eq!(drill.configuration.drill_id, Some(DrillId(id)));
    assert!(drill.configuration.prompt_layers.is_empty());

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_delete_missing_drill_is_not_found() {
    let (repo, pool) = setup_drill_repository().await;

    let err = repo.delete_by_id(DrillId(3)).await.unwrap_err();
    assert!(matches!(err, DeleteError::NotFound(_)));

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_duplicate_creates_independent_copy() {
    let (repo, pool) = setup_drill_repository().await;

    let chords = DrillConfiguration::new("Rhythm changes", 4, 180).with_layer(ChordSequenceLayer {
        chords: vec![
            Chord::new("Bb".parse().unwrap(), ChordQuality::Major7),
            Chord::new("G".parse().unwrap(), ChordQuality::Dominant7),
        ],
        ..Default::default()
    });
    let original = repo.save(chords).await.unwrap();
    let copy = repo.duplicate(original.id).await.unwrap();
    let copy_of_copy = repo.duplicate(copy.id).await.unwrap();

    assert_eq!(copy.name, "Rhythm changes copy");
    assert_eq!(copy_of_copy.name, "Rhythm changes copy copy");
    assert_eq!(copy.configuration.tempo, 180);

    repo.delete_by_id(original.id).await.unwrap();
    assert_eq!(repo.load_by_id(copy.id).await.unwrap().name, "Rhythm changes copy");

    teardown_test_db(pool).await;
}

#[tokio::test]
async fn test_save_rejects_zero_tempo() {
    let (repo, pool) = setup_drill_repository().await;

    let err = repo
        .save(DrillConfiguration::new("silent", 4, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, SaveError::Invalid(_)));
    assert!(repo.load_all().await.unwrap().is_empty());

    teardown_test_db(pool).await;
}
