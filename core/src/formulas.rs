// core/src/formulas.rs
use crate::models::{Activity, Sex};
use crate::types::{LengthUnit, WeightUnit};

pub const KG_PER_LB: f64 = 0.45359237; // eksakt definisjon
pub const CM_PER_IN: f64 = 2.54;       // eksakt definisjon
pub const KCAL_PER_LB: f64 = 3500.0;
pub const KCAL_PER_KG: f64 = 7700.0;

pub const CUT_DEFICIT_KCAL: i64 = 500;
pub const GAIN_SURPLUS_KCAL: i64 = 300;
/// Nedre sikkerhetsgrense for kuttmål. Ikke konfigurerbar.
pub const CUT_FLOOR_KCAL: i64 = 1200;

// --- RoundTo trait (offentlig, brukt av metrics.rs) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return round_half_up(self); }
        let factor = 10_f64.powi(dp as i32);
        round_half_up(self * factor) / factor
    }
}

/// Avrunding med .5 alltid oppover (også for negative tall).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

// 0, NaN => "ingen data"
#[inline]
fn is_blank(x: f64) -> bool {
    x == 0.0 || x.is_nan()
}

#[inline]
pub fn to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

/// Dividerer i stedet for å gange med 2.2046…, slik at to_kg/to_lb er eksakte inverser.
#[inline]
pub fn to_lb(kg: f64) -> f64 {
    kg / KG_PER_LB
}

#[inline]
pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

#[inline]
pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_IN
}

/// Vekt lagret i lb → visningsenhet.
pub fn weight_from_lb(lb: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lb => lb,
        WeightUnit::Kg => to_kg(lb),
    }
}

/// Verdi i visningsenhet → lb (lagringsenhet).
pub fn weight_to_lb(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lb => value,
        WeightUnit::Kg => to_lb(value),
    }
}

pub fn length_from_in(inches: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::In => inches,
        LengthUnit::Cm => in_to_cm(inches),
    }
}

pub fn length_to_in(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::In => value,
        LengthUnit::Cm => cm_to_in(value),
    }
}

/// Formatert vekt med fast antall desimaler, f.eks. "86.6".
pub fn display_weight(lb: f64, unit: WeightUnit, dp: usize) -> String {
    format!("{:.*}", dp, weight_from_lb(lb, unit))
}

/// BMI = kg / m². Returnerer 0.0 når vekt eller høyde mangler.
pub fn bmi(weight_lb: f64, height_in: f64) -> f64 {
    let kg = to_kg(weight_lb);
    let m = in_to_cm(height_in) / 100.0;
    if is_blank(kg) || is_blank(m) {
        return 0.0;
    }
    kg / (m * m)
}

/// Deurenberg: BF% = 1.20*BMI + 0.23*alder - 10.8*kjønn - 5.4 (mann=1, kvinne=0).
///
/// Klemmes ikke: urimelige input kan gi negativ verdi, visningslaget klemmer til ≥ 0.
pub fn body_fat_percent(bmi: f64, age: u32, sex: Sex) -> f64 {
    if is_blank(bmi) || age == 0 {
        return 0.0;
    }
    let s = match sex {
        Sex::Male => 1.0,
        Sex::Female => 0.0,
    };
    1.20 * bmi + 0.23 * age as f64 - 10.8 * s - 5.4
}

/// Mifflin–St Jeor (input lb/in), avrundet til nærmeste kcal.
pub fn bmr(weight_lb: f64, height_in: f64, age: u32, sex: Sex) -> i64 {
    let w = to_kg(weight_lb);
    let h = in_to_cm(height_in);
    let s = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    round_half_up(10.0 * w + 6.25 * h - 5.0 * age as f64 + s) as i64
}

pub fn tdee(bmr: i64, activity: Activity) -> i64 {
    round_half_up(bmr as f64 * activity.factor()) as i64
}

/// Kuttmål ≈ -1 lb/uke, aldri under 1200 kcal.
pub fn cut_target(tdee: i64) -> i64 {
    (tdee - CUT_DEFICIT_KCAL).max(CUT_FLOOR_KCAL)
}

pub fn gain_target(tdee: i64) -> i64 {
    tdee + GAIN_SURPLUS_KCAL
}

/// Nødvendig daglig underskudd for å tape `lb` pund over `days` dager.
pub fn deficit_per_day(lb: f64, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    ((lb * KCAL_PER_LB) / days as f64).max(0.0)
}

/// Som `deficit_per_day`, men mengden er gitt i visningsenhet (7700 kcal/kg for kg).
pub fn deficit_per_day_in(amount: f64, unit: WeightUnit, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    let kcal_per_unit = match unit {
        WeightUnit::Lb => KCAL_PER_LB,
        WeightUnit::Kg => KCAL_PER_KG,
    };
    ((amount * kcal_per_unit) / days as f64).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Unknown,
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Unknown => "—",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if !bmi.is_finite() || bmi <= 0.0 {
        BmiCategory::Unknown
    } else if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Healthy
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_matches_half_up() {
        assert_eq!(27.46_f64.round_to(1), 27.5);
        assert_eq!(27.44_f64.round_to(1), 27.4);
        assert_eq!((-0.5_f64).round_to(0), 0.0);
        assert_eq!(1832.61_f64.round_to(0), 1833.0);
    }

    #[test]
    fn bmi_category_edges() {
        assert_eq!(bmi_category(0.0), BmiCategory::Unknown);
        assert_eq!(bmi_category(f64::NAN), BmiCategory::Unknown);
        assert_eq!(bmi_category(18.49), BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5), BmiCategory::Healthy);
        assert_eq!(bmi_category(25.0), BmiCategory::Overweight);
        assert_eq!(bmi_category(30.0), BmiCategory::Obese);
    }

    #[test]
    fn deficit_zero_days_is_zero() {
        assert_eq!(deficit_per_day(10.0, 0), 0.0);
        assert_eq!(deficit_per_day(-5.0, 10), 0.0);
        assert!((deficit_per_day(10.0, 70) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn deficit_in_kg_uses_7700() {
        assert!((deficit_per_day_in(1.0, WeightUnit::Kg, 7) - 1100.0).abs() < 1e-9);
        assert_eq!(deficit_per_day_in(10.0, WeightUnit::Lb, 70), deficit_per_day(10.0, 70));
        assert_eq!(deficit_per_day_in(2.0, WeightUnit::Kg, -1), 0.0);
    }
}
