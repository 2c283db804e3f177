// PyO3-bindinger: JSON inn, JSON ut. Kun med `--features python`.
use chrono::{DateTime, NaiveDate, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use serde::Deserialize;
use serde_json::{self as json, json as json_val};
use serde_path_to_error as spte;

use crate::chart::{render_chart, ChartScales, HoverState};
use crate::formulas;
use crate::metrics::build_report;
use crate::models::{Document, Sample, Sex};
use crate::series::prepare_series;
use crate::smoothing::smooth;
use crate::types::{ChartLayout, ChartOptions, SmoothWindow, WeightUnit};

// ──────────────────────────────────────────────────────────────────────────────
// INPUT
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartIn {
    entries: Vec<Sample>,
    height_in: f64,
    #[serde(default)]
    options: ChartOptions,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    hover_x: Option<f64>,
    #[serde(default)]
    unit: WeightUnit,
    /// RFC 3339; default er nå
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

fn parse_with_path<'a, T: Deserialize<'a>>(json_in: &'a str, what: &str) -> Result<T, String> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| format!("parse error ({what}) at {}: {}", e.path(), e))
}

fn call_chart_from_json(json_in: &str) -> Result<String, String> {
    let input: ChartIn = parse_with_path(json_in, "ChartIn")?;
    let now = input.now.unwrap_or_else(Utc::now);
    let layout = ChartLayout::from_measured_width(input.width);

    let series = prepare_series(&input.entries, input.height_in, &input.options, now);
    let mut hover = HoverState::default();
    if let Some(px) = input.hover_x {
        hover.pointer_move(px, &ChartScales::new(layout, &series));
    }
    let geometry = render_chart(&series, &input.options, layout, &hover, input.unit);

    let out = json_val!({ "series": series, "geometry": geometry });
    Ok(out.to_string())
}

fn call_dashboard_from_json(doc_json: &str, today: &str) -> Result<String, String> {
    let doc: Document = parse_with_path(doc_json, "Document")?;
    let today: NaiveDate = today
        .parse()
        .map_err(|e| format!("invalid date {today:?}: {e}"))?;
    json::to_string(&build_report(&doc, today)).map_err(|e| e.to_string())
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
fn chart_json(json_in: &str) -> PyResult<String> {
    call_chart_from_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn dashboard_json(doc_json: &str, today: &str) -> PyResult<String> {
    call_dashboard_from_json(doc_json, today).map_err(PyValueError::new_err)
}

fn smooth_checked(values: &[f64], window: u8) -> Result<Vec<f64>, String> {
    let window = SmoothWindow::try_from(window)?;
    Ok(smooth(values, window))
}

#[pyfunction]
fn smooth_json(values: Vec<f64>, window: u8) -> PyResult<Vec<f64>> {
    smooth_checked(&values, window).map_err(PyValueError::new_err)
}

#[pyfunction]
fn bmi(weight_lb: f64, height_in: f64) -> f64 {
    formulas::bmi(weight_lb, height_in)
}

#[pyfunction]
fn body_fat_percent(bmi: f64, age: u32, sex: &str) -> PyResult<f64> {
    let sex: Sex = json::from_value(json_val!(sex))
        .map_err(|e| PyValueError::new_err(format!("invalid sex {sex:?}: {e}")))?;
    Ok(formulas::body_fat_percent(bmi, age, sex))
}

#[pymodule]
fn neonweight_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(chart_json, m)?)?;
    m.add_function(wrap_pyfunction!(dashboard_json, m)?)?;
    m.add_function(wrap_pyfunction!(smooth_json, m)?)?;
    m.add_function(wrap_pyfunction!(bmi, m)?)?;
    m.add_function(wrap_pyfunction!(body_fat_percent, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_json_reports_field_path_on_error() {
        let err = call_chart_from_json(r#"{"entries":[{"date":"2024-01-01","weightLb":"x"}],"heightIn":70}"#)
            .unwrap_err();
        assert!(err.contains("entries[0].weightLb"), "{err}");
    }

    #[test]
    fn smoothing_rejects_unknown_window() {
        assert!(smooth_checked(&[1.0, 2.0, 3.0], 4).is_err());
        assert!(smooth_checked(&[1.0, 2.0, 3.0], 100).is_err());
        assert_eq!(smooth_checked(&[1.0, 2.0, 3.0], 3).unwrap(), vec![1.5, 2.0, 2.5]);
    }

    #[test]
    fn chart_json_roundtrip_has_paths() {
        let out = call_chart_from_json(
            r#"{"entries":[{"date":"2024-01-01","weightLb":200},{"date":"2024-01-05","weightLb":196}],
                "heightIn":70,"now":"2024-01-06T12:00:00Z"}"#,
        )
        .unwrap();
        let v: json::Value = json::from_str(&out).unwrap();
        assert!(v["geometry"]["weight_path"].as_str().unwrap().starts_with("M "));
    }
}
