use chrono::{NaiveDate, TimeZone, Utc};
use neonweight_core::chart::HoverState;
use neonweight_core::models::{Activity, MeasureKey, Sex};
use neonweight_core::session::Session;
use neonweight_core::storage::{load_snapshot, save_snapshot, MemoryStore, LENGTH_UNIT_KEY};
use neonweight_core::telemetry::{store_metrics, Outcome, StoreOp};
use neonweight_core::types::{ChartLayout, ChartOptions, LengthUnit, WeightUnit};
use neonweight_core::Document;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

#[test]
fn fresh_store_opens_default() {
    let s = Session::open(MemoryStore::new());
    assert!(!s.has_snapshot());
    assert_eq!(s.document(), &Document::default());
    assert_eq!(s.weight_unit(), WeightUnit::Lb);
    assert_eq!(s.length_unit(), LengthUnit::In);
}

#[test]
fn reopens_saved_snapshot() {
    let store = MemoryStore::new();
    let mut doc = Document::default();
    doc.profile.age = 52;
    save_snapshot(&store, &doc).unwrap();

    let s = Session::open(store);
    assert!(s.has_snapshot());
    assert_eq!(s.document().profile.age, 52);
}

#[test]
fn rejected_writes_keep_state_in_memory() {
    let before = store_metrics().count(StoreOp::Save, Outcome::Failed);

    let mut s = Session::open(MemoryStore::rejecting());
    assert!(s.log_weight(d(1), 199.0));
    assert_eq!(s.document().entries.len(), 1);
    assert_eq!(s.document().latest_weight_lb(), 199.0);

    assert!(store_metrics().count(StoreOp::Save, Outcome::Failed) > before);
    assert!(!s.has_snapshot());
    assert!(store_metrics().render().contains("neonweight_store_ops_total"));
}

#[test]
fn kg_input_is_stored_as_lb() {
    let mut s = Session::open(MemoryStore::new());
    s.set_weight_unit(WeightUnit::Kg);
    assert!(s.log_weight(d(2), 90.0));
    let lb = s.document().entries[0].weight_lb;
    assert!((lb - 198.41604).abs() < 1e-4, "{lb}");

    let saved = load_snapshot(s.store()).unwrap().unwrap();
    assert_eq!(saved.entries, s.document().entries);
}

#[test]
fn invalid_weights_are_ignored() {
    let mut s = Session::open(MemoryStore::new());
    assert!(!s.log_weight(d(1), 0.0));
    assert!(!s.log_weight(d(1), -3.0));
    assert!(!s.log_weight(d(1), f64::INFINITY));
    assert!(s.document().entries.is_empty());
}

#[test]
fn same_day_log_overwrites() {
    let mut s = Session::open(MemoryStore::new());
    s.log_weight(d(3), 200.0);
    s.log_weight(d(3), 198.0);
    assert_eq!(s.document().entries.len(), 1);
    assert_eq!(s.document().entries[0].weight_lb, 198.0);
}

#[test]
fn delete_then_undo() {
    let mut s = Session::open(MemoryStore::new());
    s.log_weight(d(1), 200.0);
    s.log_weight(d(2), 199.0);
    let deleted = s.remove_entry(0).unwrap();
    assert_eq!(deleted.entry.date, d(1));
    assert_eq!(s.document().entries.len(), 1);

    assert!(s.undo_remove_entry());
    assert_eq!(s.document().entries[0].date, d(1));
    assert!(!s.undo_remove_entry());
}

#[test]
fn measurement_edit_in_cm() {
    let mut s = Session::open(MemoryStore::new());
    s.set_length_unit(LengthUnit::Cm);
    assert_eq!(s.store().raw(LENGTH_UNIT_KEY).as_deref(), Some("cm"));

    s.edit_measure(d(5), MeasureKey::Waist, 86.36);
    let m = s.measures_for(d(6));
    assert!((m.waist_in.unwrap() - 34.0).abs() < 1e-9);

    assert!(s.remove_measurement(0).is_some());
    assert!(s.document().measures.is_empty());
    assert!(s.undo_remove_measurement());
    assert_eq!(s.document().measures.len(), 1);
}

#[test]
fn report_and_chart_follow_document() {
    let mut s = Session::open(MemoryStore::new());
    s.edit_profile(|p| p.activity = Activity::Sedentary);
    s.set_targets(200.0, 180.0);
    s.log_weight(d(1), 195.0);
    s.log_weight(d(8), 190.0);

    let report = s.report(d(8));
    assert_eq!(report.latest_weight_lb, 190.0);
    assert_eq!(report.entry_count, 2);
    assert!((report.progress - 0.5).abs() < 1e-12);

    let now = Utc.with_ymd_and_hms(2024, 6, 8, 18, 0, 0).unwrap();
    let (series, g) = s.chart(&ChartOptions::default(), ChartLayout::default(), &HoverState::default(), now);
    assert_eq!(series.len(), 2);
    assert!(g.weight_path.is_some());
}

#[test]
fn setters_persist_to_store() {
    let mut s = Session::open(MemoryStore::new());
    s.edit_profile(|p| {
        p.sex = Sex::Female;
        p.age = 44;
        p.height_in = 65.0;
    });
    s.set_targets(190.0, 160.0);
    s.set_dates(Some(d(1)), Some(d(30)));
    assert!(s.has_snapshot());

    let saved = load_snapshot(s.store()).unwrap().unwrap();
    assert_eq!(saved.profile.sex, Sex::Female);
    assert_eq!(saved.profile.age, 44);
    assert_eq!(saved.profile.height_in, 65.0);
    assert_eq!(saved.start_weight_lb, 190.0);
    assert_eq!(saved.target_weight_lb, 160.0);
    assert_eq!(saved.start_date, Some(d(1)));
    assert_eq!(saved.target_date, Some(d(30)));
}

#[test]
fn report_pace_for_future_target() {
    let mut s = Session::open(MemoryStore::new());
    s.set_dates(None, Some(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));

    let pace = s.report(d(1)).pace.expect("target date set");
    assert_eq!(pace.days_left, 30);
    assert_eq!(pace.lb_to_go, 30.0);
    assert!((pace.deficit_per_day - 3500.0).abs() < 1e-9);
}

#[test]
fn report_pace_for_past_target() {
    let mut s = Session::open(MemoryStore::new());
    s.set_dates(None, Some(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()));

    let pace = s.report(d(1)).pace.expect("target date set");
    assert_eq!(pace.days_left, -12);
    assert_eq!(pace.deficit_per_day, 0.0);

    s.set_dates(None, Some(d(1)));
    let pace = s.report(d(1)).pace.unwrap();
    assert_eq!(pace.days_left, 0);
    assert_eq!(pace.deficit_per_day, 0.0);
}
