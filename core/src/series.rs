// core/src/series.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::debug;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::formulas::bmi;
use crate::models::Sample;
use crate::smoothing::smooth;
use crate::types::{ChartOptions, RangeDays};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Min/maks for én akse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Plassholdere når serien har < 2 punkter.
    pub const WEIGHT_PLACEHOLDER: Bounds = Bounds { min: 150.0, max: 250.0 };
    pub const BMI_PLACEHOLDER: Bounds = Bounds { min: 18.0, max: 35.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Datoen som UTC-midnatt i millisekunder.
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Trinn 1: stigende etter dato (ISO-datoer sorterer leksikalsk = kronologisk).
pub fn sort_by_date(entries: &[Sample]) -> Vec<Sample> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|s| s.date);
    sorted
}

/// Grensen (ms) for et tidsvindu. `None` for "all".
pub fn range_cutoff(range: RangeDays, now: DateTime<Utc>) -> Option<i64> {
    range
        .days()
        .map(|d| now.timestamp_millis() - i64::from(d) * MS_PER_DAY)
}

/// Trinn 2: dropper veiinger eldre enn `now - range`. Grensen regnes ut én gang per kall.
pub fn filter_range(sorted: &[Sample], range: RangeDays, now: DateTime<Utc>) -> Vec<Sample> {
    match range_cutoff(range, now) {
        None => sorted.to_vec(),
        Some(cutoff) => sorted
            .iter()
            .filter(|s| date_to_millis(s.date) >= cutoff)
            .copied()
            .collect(),
    }
}

/// Trinn 3: BMI per veiing, indeks-justert mot input.
pub fn derive_bmi(samples: &[Sample], height_in: f64) -> Vec<f64> {
    samples.iter().map(|s| bmi(s.weight_lb, height_in)).collect()
}

/// Trinn 5: min/maks, eller `fallback` når det er for få punkter til en skala.
pub fn fit_bounds(values: &[f64], fallback: Bounds) -> Bounds {
    if values.len() < 2 {
        return fallback;
    }
    let min = values.iter().copied().map(OrderedFloat).min();
    let max = values.iter().copied().map(OrderedFloat).max();
    match (min, max) {
        (Some(lo), Some(hi)) => Bounds::new(lo.0, hi.0),
        _ => fallback,
    }
}

/// Tidsakse: plassholder er siste 7 dager frem til `now`.
pub fn fit_time_bounds(timestamps: &[i64], now: DateTime<Utc>) -> Bounds {
    let now_ms = now.timestamp_millis() as f64;
    let fallback = Bounds::new(now_ms - (7 * MS_PER_DAY) as f64, now_ms);
    if timestamps.len() < 2 {
        return fallback;
    }
    match (timestamps.iter().min(), timestamps.iter().max()) {
        (Some(lo), Some(hi)) => Bounds::new(*lo as f64, *hi as f64),
        _ => fallback,
    }
}

/// Plot-klar serie: alle vektorer har samme lengde og samme rekkefølge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedSeries {
    pub dates: Vec<NaiveDate>,
    pub timestamps: Vec<i64>,
    /// Vekt (lb), glattet
    pub primary: Vec<f64>,
    /// BMI, glattet
    pub derived: Vec<f64>,
    pub time_bounds: Bounds,
    pub primary_bounds: Bounds,
    pub derived_bounds: Bounds,
}

impl PreparedSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Hele pipelinen: sorter → filtrer → BMI → glatt → skaler.
///
/// Ren funksjon av input; `now` sendes inn for at resultatet skal være deterministisk.
pub fn prepare_series(
    entries: &[Sample],
    height_in: f64,
    opts: &ChartOptions,
    now: DateTime<Utc>,
) -> PreparedSeries {
    let sorted = sort_by_date(entries);
    let data = filter_range(&sorted, opts.range_days, now);

    let dates: Vec<NaiveDate> = data.iter().map(|s| s.date).collect();
    let timestamps: Vec<i64> = dates.iter().map(|d| date_to_millis(*d)).collect();
    let weights: Vec<f64> = data.iter().map(|s| s.weight_lb).collect();
    let bmis = derive_bmi(&data, height_in);

    let primary = smooth(&weights, opts.smooth_window);
    let derived = smooth(&bmis, opts.smooth_window);

    debug!(
        "series: {} av {} veiinger etter filter (range={:?}, smooth={})",
        data.len(),
        entries.len(),
        opts.range_days,
        opts.smooth_window.size()
    );

    PreparedSeries {
        time_bounds: fit_time_bounds(&timestamps, now),
        primary_bounds: fit_bounds(&primary, Bounds::WEIGHT_PLACEHOLDER),
        derived_bounds: fit_bounds(&derived, Bounds::BMI_PLACEHOLDER),
        dates,
        timestamps,
        primary,
        derived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_single_point_uses_placeholder() {
        assert_eq!(fit_bounds(&[190.0], Bounds::WEIGHT_PLACEHOLDER), Bounds::WEIGHT_PLACEHOLDER);
        assert_eq!(fit_bounds(&[], Bounds::BMI_PLACEHOLDER), Bounds::BMI_PLACEHOLDER);
    }

    #[test]
    fn bounds_min_max() {
        let b = fit_bounds(&[191.0, 200.0, 194.5], Bounds::WEIGHT_PLACEHOLDER);
        assert_eq!(b, Bounds::new(191.0, 200.0));
    }

    #[test]
    fn date_millis_is_utc_midnight() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(date_to_millis(d), MS_PER_DAY);
    }
}
