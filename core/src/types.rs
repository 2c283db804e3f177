use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lb,
    Kg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    In,
    Cm,
}

impl WeightUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Lb => "lb",
            WeightUnit::Kg => "kg",
        }
    }
}

impl LengthUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lb" => Ok(WeightUnit::Lb),
            "kg" => Ok(WeightUnit::Kg),
            other => Err(StoreError::UnknownUnit(other.to_string())),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(LengthUnit::In),
            "cm" => Ok(LengthUnit::Cm),
            other => Err(StoreError::UnknownUnit(other.to_string())),
        }
    }
}

/// Tidsvindu for grafen: siste N dager eller alt.
///
/// Serialiseres som tall (`30`) eller strengen `"all"`, samme form som UI-valget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RangeRepr", into = "RangeRepr")]
pub enum RangeDays {
    Last(u32),
    #[default]
    All,
}

impl RangeDays {
    /// Valgene UI-et tilbyr (i tillegg til "all").
    pub const PRESETS: [u32; 5] = [7, 30, 90, 180, 365];

    pub fn days(self) -> Option<u32> {
        match self {
            RangeDays::Last(d) => Some(d),
            RangeDays::All => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Days(u32),
    Word(String),
}

impl TryFrom<RangeRepr> for RangeDays {
    type Error = String;

    fn try_from(r: RangeRepr) -> Result<Self, Self::Error> {
        match r {
            RangeRepr::Days(0) => Err("rangeDays must be positive".into()),
            RangeRepr::Days(d) => Ok(RangeDays::Last(d)),
            RangeRepr::Word(w) if w == "all" => Ok(RangeDays::All),
            RangeRepr::Word(w) => w
                .parse::<u32>()
                .ok()
                .filter(|d| *d > 0)
                .map(RangeDays::Last)
                .ok_or_else(|| format!("invalid rangeDays: {w:?}")),
        }
    }
}

impl From<RangeDays> for RangeRepr {
    fn from(r: RangeDays) -> Self {
        match r {
            RangeDays::Last(d) => RangeRepr::Days(d),
            RangeDays::All => RangeRepr::Word("all".into()),
        }
    }
}

/// Odde glattevindu i {1,3,5,7}. 1 = av.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SmoothWindow(u8);

impl SmoothWindow {
    pub const OFF: SmoothWindow = SmoothWindow(1);
    pub const CHOICES: [u8; 4] = [1, 3, 5, 7];

    pub fn new(n: u8) -> Option<Self> {
        Self::CHOICES.contains(&n).then_some(SmoothWindow(n))
    }

    pub fn size(self) -> usize {
        self.0 as usize
    }
}

impl Default for SmoothWindow {
    fn default() -> Self {
        Self::OFF
    }
}

impl TryFrom<u8> for SmoothWindow {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        SmoothWindow::new(n).ok_or_else(|| format!("smooth window must be one of 1,3,5,7 (got {n})"))
    }
}

impl From<SmoothWindow> for u8 {
    fn from(w: SmoothWindow) -> u8 {
        w.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub range_days: RangeDays,
    pub smooth_window: SmoothWindow,
    #[serde(rename = "showBMI")]
    pub show_bmi: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            range_days: RangeDays::All,
            smooth_window: SmoothWindow::OFF,
            show_bmi: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 16.0, right: 18.0, bottom: 28.0, left: 34.0 }
    }
}

/// Tegneflate i piksler, inkl. marger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margin: Margin,
}

impl ChartLayout {
    pub const MIN_WIDTH: f64 = 280.0;
    pub const FALLBACK_WIDTH: f64 = 320.0;
    pub const HEIGHT: f64 = 220.0;

    /// Bygger layout fra målt bredde (0/NaN = ikke målt ennå).
    pub fn from_measured_width(measured: f64) -> Self {
        let w = if measured.is_finite() && measured > 0.0 { measured } else { Self::FALLBACK_WIDTH };
        Self {
            width: w.max(Self::MIN_WIDTH),
            height: Self::HEIGHT,
            margin: Margin::default(),
        }
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::from_measured_width(0.0)
    }
}
