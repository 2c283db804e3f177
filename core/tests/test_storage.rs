use chrono::NaiveDate;
use neonweight_core::error::StoreError;
use neonweight_core::models::{Document, MeasureKey, MeasurementSample, Sample};
use neonweight_core::storage::{
    load_document, load_length_unit, load_snapshot, load_weight_unit, parse_document,
    save_document, save_snapshot, save_weight_unit, JsonDirStore, KeyValueStore, MemoryStore,
    STATE_KEY, WEIGHT_UNIT_KEY,
};
use neonweight_core::types::{LengthUnit, WeightUnit};
use tempfile::tempdir;

fn sample_doc() -> Document {
    let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
    Document {
        name: Some("Kari".into()),
        entries: vec![Sample::new(date, 188.4)],
        measures: vec![MeasurementSample::empty(date).with(MeasureKey::Hips, 40.5)],
        ..Document::default()
    }
}

#[test]
fn json_dir_store_roundtrip() {
    let dir = tempdir().unwrap();
    let store = JsonDirStore::new(dir.path().join("state"));
    assert_eq!(load_snapshot(&store).unwrap(), None);

    let doc = sample_doc();
    save_snapshot(&store, &doc).unwrap();
    assert!(dir.path().join("state").join(format!("{STATE_KEY}.json")).exists());
    assert_eq!(load_snapshot(&store).unwrap(), Some(doc));
}

#[test]
fn missing_document_file_gives_default() {
    let dir = tempdir().unwrap();
    let doc = load_document(dir.path().join("nope.json")).unwrap();
    assert_eq!(doc, Document::default());
}

#[test]
fn save_then_load_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.json");
    let doc = sample_doc();
    save_document(&doc, &path).unwrap();
    assert_eq!(load_document(&path).unwrap(), doc);
}

#[test]
fn legacy_goal_weight_is_accepted() {
    let doc = parse_document(
        r#"{"profile":{"sex":"female","age":41,"heightIn":64,"activity":"light"},
            "startWeightLb":180,"goalWeightLb":150,
            "entries":[{"date":"2024-01-02","weightLb":179.2}]}"#,
    )
    .unwrap();
    assert_eq!(doc.target_weight_lb, 150.0);
    assert_eq!(doc.entries.len(), 1);
    assert!(doc.measures.is_empty());

    let out = serde_json::to_string(&doc).unwrap();
    assert!(out.contains("\"targetWeightLb\":150.0"));
    assert!(!out.contains("measures"));
}

const BOTH_TARGET_KEYS: &str = r#"{"profile":{"sex":"male","age":30,"heightIn":70,"activity":"moderate"},
    "startWeightLb":200,"goalWeightLb":170,"targetWeightLb":165,
    "entries":[{"date":"2024-01-01","weightLb":199},{"date":"2024-01-02","weightLb":198.4}]}"#;

#[test]
fn snapshot_with_goal_and_target_keys_parses() {
    let doc = parse_document(BOTH_TARGET_KEYS).unwrap();
    assert_eq!(doc.target_weight_lb, 165.0);
    assert_eq!(doc.entries.len(), 2);

    // kun kanonisk nøkkel skrives tilbake
    let out = serde_json::to_string(&doc).unwrap();
    assert!(!out.contains("goalWeightLb"));
    assert_eq!(parse_document(&out).unwrap(), doc);
}

#[test]
fn session_keeps_history_from_mixed_snapshot() {
    use neonweight_core::session::Session;

    let store = MemoryStore::new();
    store.set(STATE_KEY, BOTH_TARGET_KEYS).unwrap();

    let mut s = Session::open(store);
    assert!(s.has_snapshot());
    assert_eq!(s.document().entries.len(), 2);

    s.log_weight(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 197.8);
    let saved = load_snapshot(s.store()).unwrap().unwrap();
    assert_eq!(saved.entries.len(), 3);
    assert_eq!(saved.target_weight_lb, 165.0);
}

#[test]
fn missing_target_falls_back_to_default() {
    let doc = parse_document(
        r#"{"profile":{"sex":"male","age":30,"heightIn":70,"activity":"moderate"},"startWeightLb":210}"#,
    )
    .unwrap();
    assert_eq!(doc.target_weight_lb, Document::DEFAULT_TARGET_LB);
    assert_eq!(doc.start_weight_lb, 210.0);
}

#[test]
fn json_error_points_at_field() {
    let err = parse_document(
        r#"{"profile":{"sex":"male","age":30,"heightIn":70,"activity":"moderate"},
            "startWeightLb":200,"targetWeightLb":170,
            "entries":[{"date":"2024-01-02","weightLb":"heavy"}]}"#,
    )
    .unwrap_err();
    match err {
        StoreError::Json { path, .. } => assert_eq!(path, "entries[0].weightLb"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unit_preferences_roundtrip() {
    let store = MemoryStore::new();
    assert_eq!(load_weight_unit(&store).unwrap(), None);

    save_weight_unit(&store, WeightUnit::Kg).unwrap();
    assert_eq!(store.raw(WEIGHT_UNIT_KEY).as_deref(), Some("kg"));
    assert_eq!(load_weight_unit(&store).unwrap(), Some(WeightUnit::Kg));

    store.set("neon_length_unit", "furlong").unwrap();
    assert!(matches!(load_length_unit(&store), Err(StoreError::UnknownUnit(_))));
    store.set("neon_length_unit", "cm").unwrap();
    assert_eq!(load_length_unit(&store).unwrap(), Some(LengthUnit::Cm));
}

#[test]
fn rejecting_store_reports_error() {
    let store = MemoryStore::rejecting();
    assert!(matches!(
        save_snapshot(&store, &Document::default()),
        Err(StoreError::Rejected(_))
    ));
}
