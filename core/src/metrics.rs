use chrono::NaiveDate;
use serde::Serialize;

use crate::formulas::{
    self, bmi_category, body_fat_percent, cut_target, deficit_per_day, gain_target, BmiCategory,
    RoundTo,
};
use crate::models::Document;

/// Andel av veien fra start til mål, klemt til [0, 1]. Null-spenn behandles som 1.
pub fn progress_fraction(start_lb: f64, goal_lb: f64, current_lb: f64) -> f64 {
    let span = start_lb - goal_lb;
    let span = if span == 0.0 || span.is_nan() { 1.0 } else { span };
    ((start_lb - current_lb) / span).clamp(0.0, 1.0)
}

/// Fett% for visning: aldri negativ, 1 desimal.
pub fn display_body_fat(bmi: f64, age: u32, sex: crate::models::Sex) -> f64 {
    body_fat_percent(bmi, age, sex).max(0.0).round_to(1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPace {
    pub days_left: i64,
    pub lb_to_go: f64,
    pub deficit_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub latest_weight_lb: f64,
    /// 1 desimal
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub body_fat_pct: f64,
    pub progress: f64,
    pub bmr: i64,
    pub tdee: i64,
    pub cut_kcal: i64,
    pub gain_kcal: i64,
    pub entry_count: usize,
    pub pace: Option<GoalPace>,
}

/// Tallene på forsiden, avledet fra dokumentet.
pub fn build_report(doc: &Document, today: NaiveDate) -> DashboardReport {
    let p = &doc.profile;
    let latest = doc.latest_weight_lb();

    // avrundet BMI brukes videre i fett%, som i visningen
    let bmi = formulas::bmi(latest, p.height_in).round_to(1);
    let bmr = formulas::bmr(latest, p.height_in, p.age, p.sex);
    let tdee = formulas::tdee(bmr, p.activity);

    let pace = doc.target_date.map(|target| {
        let days_left = (target - today).num_days();
        let lb_to_go = latest - doc.target_weight_lb;
        GoalPace {
            days_left,
            lb_to_go,
            deficit_per_day: deficit_per_day(lb_to_go, days_left),
        }
    });

    DashboardReport {
        latest_weight_lb: latest,
        bmi,
        bmi_category: bmi_category(bmi),
        body_fat_pct: display_body_fat(bmi, p.age, p.sex),
        progress: progress_fraction(doc.start_weight_lb, doc.target_weight_lb, latest),
        bmr,
        tdee,
        cut_kcal: cut_target(tdee),
        gain_kcal: gain_target(tdee),
        entry_count: doc.entries.len(),
        pace,
    }
}
