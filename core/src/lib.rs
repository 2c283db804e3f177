//! Neon Weight core: formler, serie-pipeline og grafgeometri for vekt- og målingslogg.
//!
//! Kjernen er fri for I/O; lagring går via `storage::KeyValueStore` som injiseres i `session::Session`.

pub mod chart;
pub mod cli;
pub mod entries;
pub mod error;
pub mod formulas;
pub mod measurements;
pub mod metrics;
pub mod models;
pub mod series;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use chart::{nearest_index, render_chart, ChartGeometry, ChartScales, HoverState};
pub use error::{StoreError, StoreResult};
pub use formulas::{
    bmi, bmr, body_fat_percent, cut_target, gain_target, tdee, to_kg, to_lb, RoundTo,
};
pub use metrics::{build_report, DashboardReport};
pub use models::{Activity, Document, MeasureKey, MeasurementSample, Profile, Sample, Sex};
pub use series::{prepare_series, PreparedSeries};
pub use session::Session;
pub use smoothing::moving_average;
pub use storage::{load_document, save_document, JsonDirStore, KeyValueStore, MemoryStore};
pub use types::{ChartLayout, ChartOptions, LengthUnit, RangeDays, SmoothWindow, WeightUnit};
