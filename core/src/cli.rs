use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::chart::sparkline_path;
use crate::formulas::{deficit_per_day_in, display_weight, weight_from_lb};
use crate::metrics::{build_report, DashboardReport};
use crate::models::Document;
use crate::series::sort_by_date;
use crate::types::WeightUnit;

pub fn format_report(report: &DashboardReport, doc: &Document, unit: WeightUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Weight Report ---");
    let _ = writeln!(out, "Weight: {} {}", display_weight(report.latest_weight_lb, unit, 1), unit);
    let _ = writeln!(out, "BMI: {:.1} ({})", report.bmi, report.bmi_category.label());
    let _ = writeln!(out, "Body fat: {:.1}%", report.body_fat_pct);
    let _ = writeln!(
        out,
        "Progress: {}% (start {} {} → goal {} {})",
        (report.progress * 100.0).round(),
        display_weight(doc.start_weight_lb, unit, 1),
        unit,
        display_weight(doc.target_weight_lb, unit, 1),
        unit
    );
    let _ = writeln!(out, "BMR: {} kcal · TDEE: {} kcal", report.bmr, report.tdee);
    let _ = writeln!(out, "Cut: {} kcal · Gain: {} kcal", report.cut_kcal, report.gain_kcal);
    if let Some(p) = &report.pace {
        // kg-visning regner med 7700 kcal/kg, ikke omregnet 3500 kcal/lb
        let to_go = weight_from_lb(p.lb_to_go, unit);
        let _ = writeln!(
            out,
            "Goal pace: {} days left, {:.1} {} to go, {:.0} kcal/day deficit",
            p.days_left,
            to_go,
            unit,
            deficit_per_day_in(to_go, unit, p.days_left)
        );
    }
    let _ = writeln!(out, "Entries: {}", report.entry_count);
    out
}

pub fn print_dashboard_report(doc: &Document, today: NaiveDate, unit: WeightUnit) {
    let report = build_report(doc, today);
    print!("{}", format_report(&report, doc, unit));

    let weights: Vec<f64> = sort_by_date(&doc.entries).iter().map(|s| s.weight_lb).collect();
    match sparkline_path(&weights, 340.0, 110.0) {
        Some(d) => println!("Trend (last {} entries): {}", weights.len(), d),
        None => println!("Trend: not enough entries"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_mentions_unit_and_calories() {
        let doc = Document::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let text = format_report(&build_report(&doc, today), &doc, WeightUnit::Kg);
        assert!(text.contains("Weight: 90.7 kg"));
        assert!(text.contains("BMR:"));
        assert!(!text.contains("Goal pace"));
    }

    #[test]
    fn goal_pace_in_kg_uses_kcal_per_kg() {
        let doc = Document {
            target_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Document::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let text = format_report(&build_report(&doc, today), &doc, WeightUnit::Kg);
        // 30 lb = 13.6 kg; 13.607771 * 7700 / 30 ≈ 3493
        assert!(text.contains("Goal pace: 30 days left, 13.6 kg to go, 3493 kcal/day deficit"), "{text}");
    }
}
