use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use log::info;

use neonweight_core::chart::{render_chart, to_svg, ChartScales, HoverState};
use neonweight_core::cli::print_dashboard_report;
use neonweight_core::entries::{find_by_date, upsert_sample};
use neonweight_core::formulas::weight_to_lb;
use neonweight_core::models::Sample;
use neonweight_core::series::prepare_series;
use neonweight_core::storage::{load_document, save_document};
use neonweight_core::types::{ChartLayout, ChartOptions, RangeDays, SmoothWindow, WeightUnit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Neon Weight: report and chart export from a snapshot file", long_about = None)]
struct Cli {
    /// Snapshot JSON (same shape as the app's stored document)
    #[arg(short, long, global = true, default_value = "neonweight.json", value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Display unit (lb or kg)
    #[arg(short, long, global = true, default_value = "lb")]
    unit: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print BMI, body fat, calorie targets and progress
    Report {
        /// Reference day (defaults to today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Log (or replace) the weight for a day
    Log {
        /// Weight in the display unit
        weight: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Render the history chart to SVG
    Chart {
        #[arg(short, long, default_value = "chart.svg", value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// 7, 30, 90, 180, 365 or "all"
        #[arg(long, default_value = "all")]
        range: String,
        /// Moving-average window: 1, 3, 5 or 7
        #[arg(long, default_value_t = 1)]
        smooth: u8,
        #[arg(long, default_value_t = 0.0)]
        width: f64,
        #[arg(long, action = ArgAction::SetTrue)]
        no_bmi: bool,
        /// Horizontal pointer position (px) to draw the hover cursor at
        #[arg(long)]
        hover_x: Option<f64>,
    },
}

fn parse_range(s: &str) -> Result<RangeDays> {
    serde_json::from_value(match s.parse::<u32>() {
        Ok(n) => serde_json::Value::from(n),
        Err(_) => serde_json::Value::from(s),
    })
    .map_err(|e| anyhow!("invalid --range {s:?}: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let unit: WeightUnit = cli.unit.parse().context("invalid --unit")?;
    let mut doc = load_document(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    match cli.command {
        Command::Report { today } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            print_dashboard_report(&doc, today, unit);
        }
        Command::Log { weight, date } => {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(anyhow!("weight must be a positive number"));
            }
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            if let Some((_, prev)) = find_by_date(&doc.entries, date) {
                info!("Erstatter {:.1} lb for {date}", prev.weight_lb);
            }
            doc.entries = upsert_sample(&doc.entries, Sample::new(date, weight_to_lb(weight, unit)));
            save_document(&doc, &cli.file)
                .with_context(|| format!("failed to write {}", cli.file.display()))?;
            info!("Logget {weight} {unit} for {date}");
        }
        Command::Chart { out, range, smooth, width, no_bmi, hover_x } => {
            let opts = ChartOptions {
                range_days: parse_range(&range)?,
                smooth_window: SmoothWindow::new(smooth)
                    .ok_or_else(|| anyhow!("--smooth must be one of 1, 3, 5, 7"))?,
                show_bmi: !no_bmi,
            };
            let layout = ChartLayout::from_measured_width(width);

            let series = prepare_series(&doc.entries, doc.profile.height_in, &opts, Utc::now());
            let mut hover = HoverState::default();
            if let Some(px) = hover_x {
                hover.pointer_move(px, &ChartScales::new(layout, &series));
            }
            let geometry = render_chart(&series, &opts, layout, &hover, unit);

            std::fs::write(&out, to_svg(&geometry, &layout))
                .with_context(|| format!("failed to write {}", out.display()))?;
            if let Some(t) = &geometry.tooltip {
                println!("{}: {} {}{}", t.date, t.weight, t.unit, t.bmi.as_ref().map(|b| format!(" · BMI {b}")).unwrap_or_default());
            }
            println!("Wrote {} ({} points)", out.display(), series.len());
        }
    }
    Ok(())
}
