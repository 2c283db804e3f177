use chrono::NaiveDate;

use crate::formulas::length_to_in;
use crate::models::{MeasureKey, MeasurementSample};
use crate::types::LengthUnit;

/// Upsert per dato med felt-fletting: kun feltene i `patch` overskrives.
pub fn upsert_measurement(measures: &[MeasurementSample], patch: &MeasurementSample) -> Vec<MeasurementSample> {
    let mut next = measures.to_vec();
    match next.iter_mut().find(|m| m.date == patch.date) {
        Some(existing) => *existing = existing.merged_with(patch),
        None => next.push(*patch),
    }
    next
}

/// Ett felt redigert fra silhuetten. Verdien kommer i visningsenhet, lagres i tommer.
///
/// Ikke-endelige verdier ignoreres (listen returneres uendret).
pub fn edit_field(
    measures: &[MeasurementSample],
    date: NaiveDate,
    key: MeasureKey,
    value_in_unit: f64,
    unit: LengthUnit,
) -> Vec<MeasurementSample> {
    if !value_in_unit.is_finite() {
        return measures.to_vec();
    }
    let patch = MeasurementSample::empty(date).with(key, length_to_in(value_in_unit, unit));
    upsert_measurement(measures, &patch)
}

/// Visning for en dato: siste måling på/før datoen, overlagt med dagens egne felt.
pub fn current_for_date(measures: &[MeasurementSample], date: NaiveDate) -> MeasurementSample {
    let prior = measures
        .iter()
        .filter(|m| m.date <= date)
        .max_by_key(|m| m.date)
        .copied();
    let day = measures.iter().find(|m| m.date == date);

    let mut out = match (prior, day) {
        (Some(p), Some(d)) => p.merged_with(d),
        (Some(p), None) => p,
        (None, Some(d)) => *d,
        (None, None) => MeasurementSample::empty(date),
    };
    out.date = date;
    out
}

/// Nøytral silhuett (tommer).
pub fn baseline_in(key: MeasureKey) -> f64 {
    match key {
        MeasureKey::Shoulders => 48.0,
        MeasureKey::Chest => 40.0,
        MeasureKey::Waist => 34.0,
        MeasureKey::Hips => 40.0,
        MeasureKey::Neck => 15.0,
        MeasureKey::BicepsL | MeasureKey::BicepsR => 13.0,
        MeasureKey::ForearmL | MeasureKey::ForearmR => 11.0,
        MeasureKey::ThighL | MeasureKey::ThighR => 22.0,
        MeasureKey::CalfL | MeasureKey::CalfR => 15.0,
    }
}

pub const MIN_REGION_SCALE: f64 = 0.7;
pub const MAX_REGION_SCALE: f64 = 1.6;

/// Skalering av én region mot baseline, 1.0 når målingen mangler.
pub fn region_scale(measures: &MeasurementSample, key: MeasureKey) -> f64 {
    match measures.get(key) {
        Some(v) if v > 0.0 && v.is_finite() => (v / baseline_in(key)).clamp(MIN_REGION_SCALE, MAX_REGION_SCALE),
        _ => 1.0,
    }
}

/// Opasitet på fettlaget i silhuetten, drevet av fett%.
pub fn fat_overlay_opacity(body_fat_pct: f64) -> f64 {
    ((body_fat_pct - 10.0) / 25.0).clamp(0.0, 0.85)
}

/// Alt silhuetten trenger: skalering per region + fettlag.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MorphInputs {
    pub scales: Vec<(MeasureKey, f64)>,
    pub fat_opacity: f64,
}

pub fn morph_inputs(measures: &MeasurementSample, body_fat_pct: f64) -> MorphInputs {
    MorphInputs {
        scales: MeasureKey::ALL.iter().map(|k| (*k, region_scale(measures, *k))).collect(),
        fat_opacity: fat_overlay_opacity(body_fat_pct),
    }
}
