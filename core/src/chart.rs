// core/src/chart.rs
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::formulas::display_weight;
use crate::models::Sample;
use crate::series::{prepare_series, Bounds, PreparedSeries};
use crate::types::{ChartLayout, ChartOptions, WeightUnit};

/// Minste spenn for å unngå deling på null (ms på x, verdienheter på y).
const MIN_TIME_SPAN_MS: f64 = 1.0;
const MIN_VALUE_SPAN: f64 = 0.0001;

pub const GRID_LINES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Derived,
}

/// Lineær mapping data → piksler. Felles x-skala, egen y-skala per serie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub layout: ChartLayout,
    pub time: Bounds,
    pub primary: Bounds,
    pub derived: Bounds,
}

impl ChartScales {
    pub fn new(layout: ChartLayout, series: &PreparedSeries) -> Self {
        Self {
            layout,
            time: series.time_bounds,
            primary: series.primary_bounds,
            derived: series.derived_bounds,
        }
    }

    pub fn x(&self, t_ms: f64) -> f64 {
        let m = &self.layout.margin;
        m.left + ((t_ms - self.time.min) / self.time.span().max(MIN_TIME_SPAN_MS)) * self.layout.inner_width()
    }

    /// Invertert: større verdi → mindre y (origo øverst til venstre).
    pub fn y(&self, axis: Axis, v: f64) -> f64 {
        let b = match axis {
            Axis::Primary => self.primary,
            Axis::Derived => self.derived,
        };
        let inner_h = self.layout.inner_height();
        self.layout.margin.top + inner_h - ((v - b.min) / b.span().max(MIN_VALUE_SPAN)) * inner_h
    }

    /// Invers av `x`: piksel → tidspunkt (ms). `None` hvis resultatet ikke er endelig.
    pub fn time_at(&self, px: f64) -> Option<f64> {
        let t = self.time.min
            + ((px - self.layout.margin.left) / self.layout.inner_width()) * self.time.span();
        t.is_finite().then_some(t)
    }

    /// "M x y L x y …" for én serie. `None` når det er færre enn 2 punkter.
    pub fn path(&self, timestamps: &[i64], values: &[f64], axis: Axis) -> Option<String> {
        if timestamps.len() < 2 || values.len() < timestamps.len() {
            return None;
        }
        let mut d = String::new();
        for (i, (t, v)) in timestamps.iter().zip(values).enumerate() {
            if i > 0 {
                d.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{} {} {}", cmd, self.x(*t as f64), self.y(axis, *v));
        }
        Some(d)
    }

    /// Y-posisjoner for de horisontale hjelpelinjene, jevnt fordelt.
    pub fn grid_lines(&self) -> Vec<f64> {
        let top = self.layout.margin.top;
        let inner_h = self.layout.inner_height();
        (0..GRID_LINES)
            .map(|i| top + (i as f64 / (GRID_LINES - 1) as f64) * inner_h)
            .collect()
    }
}

/// Nærmeste tidspunkt ved lineært søk. Ved likt avstand vinner laveste indeks.
pub fn nearest_index(timestamps: &[i64], t_ms: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, ts) in timestamps.iter().enumerate() {
        let dist = (*ts as f64 - t_ms).abs();
        match best {
            Some((_, b)) if dist >= b => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Eneste UI-tilstand i grafen: sist hovrede tidspunkt. Påvirker kun utheving.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    pub hovered_ms: Option<f64>,
}

impl HoverState {
    pub fn pointer_move(&mut self, px: f64, scales: &ChartScales) {
        self.hovered_ms = scales.time_at(px);
    }

    pub fn pointer_leave(&mut self) {
        self.hovered_ms = None;
    }

    pub fn nearest(&self, series: &PreparedSeries) -> Option<usize> {
        nearest_index(&series.timestamps, self.hovered_ms?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cursor {
    pub index: usize,
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub primary_dot: Point,
    pub derived_dot: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub date: NaiveDate,
    /// Vekt i visningsenhet, 1 desimal
    pub weight: String,
    pub unit: WeightUnit,
    pub bmi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub grid_lines: Vec<f64>,
    pub weight_path: Option<String>,
    pub bmi_path: Option<String>,
    pub cursor: Option<Cursor>,
    pub tooltip: Option<Tooltip>,
}

/// Geometri for en ferdig pipeline-serie. Ingen cache: alt regnes fra input.
pub fn render_chart(
    series: &PreparedSeries,
    opts: &ChartOptions,
    layout: ChartLayout,
    hover: &HoverState,
    unit: WeightUnit,
) -> ChartGeometry {
    let scales = ChartScales::new(layout, series);

    let weight_path = scales.path(&series.timestamps, &series.primary, Axis::Primary);
    let bmi_path = if opts.show_bmi {
        scales.path(&series.timestamps, &series.derived, Axis::Derived)
    } else {
        None
    };

    let nearest = hover.nearest(series);
    let cursor = nearest.map(|idx| {
        let x = scales.x(series.timestamps[idx] as f64);
        Cursor {
            index: idx,
            x,
            y_top: layout.margin.top,
            y_bottom: layout.height - layout.margin.bottom,
            primary_dot: Point { x, y: scales.y(Axis::Primary, series.primary[idx]) },
            derived_dot: opts
                .show_bmi
                .then(|| Point { x, y: scales.y(Axis::Derived, series.derived[idx]) }),
        }
    });
    let tooltip = nearest.map(|idx| Tooltip {
        date: series.dates[idx],
        weight: display_weight(series.primary[idx], unit, 1),
        unit,
        bmi: opts.show_bmi.then(|| format!("{:.1}", series.derived[idx])),
    });

    ChartGeometry {
        width: layout.width,
        height: layout.height,
        grid_lines: scales.grid_lines(),
        weight_path,
        bmi_path,
        cursor,
        tooltip,
    }
}

/// Fra rå veiinger: kjører hele pipelinen på nytt før geometrien bygges.
pub fn render_entries(
    entries: &[Sample],
    height_in: f64,
    opts: &ChartOptions,
    layout: ChartLayout,
    hover: &HoverState,
    unit: WeightUnit,
    now: DateTime<Utc>,
) -> (PreparedSeries, ChartGeometry) {
    let series = prepare_series(entries, height_in, opts, now);
    let geometry = render_chart(&series, opts, layout, hover, unit);
    (series, geometry)
}

/// Enkel SVG av geometrien (uten glød/gradienter).
pub fn to_svg(g: &ChartGeometry, layout: &ChartLayout) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = g.width,
        h = g.height
    );
    svg.push_str("  <g opacity=\"0.28\">\n");
    for y in &g.grid_lines {
        let _ = writeln!(
            svg,
            r#"    <line x1="{}" x2="{}" y1="{y}" y2="{y}" stroke="rgba(255,255,255,.15)" />"#,
            layout.margin.left,
            g.width - layout.margin.right
        );
    }
    svg.push_str("  </g>\n");
    if let Some(d) = &g.weight_path {
        let _ = writeln!(svg, r##"  <path d="{d}" stroke="#00F0FF" stroke-width="3" fill="none" stroke-linecap="round" />"##);
    }
    if let Some(d) = &g.bmi_path {
        let _ = writeln!(svg, r##"  <path d="{d}" stroke="#FF4DFF" stroke-width="2.25" fill="none" stroke-linecap="round" opacity="0.9" />"##);
    }
    if let Some(c) = &g.cursor {
        let _ = writeln!(
            svg,
            r#"  <line x1="{x}" x2="{x}" y1="{}" y2="{}" stroke="rgba(255,255,255,.25)" stroke-dasharray="4 4" />"#,
            c.y_top,
            c.y_bottom,
            x = c.x
        );
        let _ = writeln!(svg, r##"  <circle cx="{}" cy="{}" r="4.5" fill="#00F0FF" />"##, c.primary_dot.x, c.primary_dot.y);
        if let Some(p) = &c.derived_dot {
            let _ = writeln!(svg, r##"  <circle cx="{}" cy="{}" r="3.8" fill="#FF4DFF" opacity="0.9" />"##, p.x, p.y);
        }
    }
    svg.push_str("</svg>\n");
    svg
}

pub const SPARKLINE_PAD: f64 = 8.0;

/// Indeksbasert minigraf (ingen tidsakse). `None` for < 2 verdier.
pub fn sparkline_path(values: &[f64], width: f64, height: f64) -> Option<String> {
    if values.len() < 2 {
        return None;
    }
    let pad = SPARKLINE_PAD;
    let min_y = values.iter().copied().fold(f64::INFINITY, f64::min) - MIN_VALUE_SPAN;
    let max_y = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + MIN_VALUE_SPAN;
    let last = (values.len() - 1) as f64;

    let mut d = String::new();
    for (i, v) in values.iter().enumerate() {
        let sx = pad + (i as f64 / last) * (width - pad * 2.0);
        let sy = height - pad - ((v - min_y) / (max_y - min_y)) * (height - pad * 2.0);
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{} {} {}", if i == 0 { 'M' } else { 'L' }, sx, sy);
    }
    Some(d)
}
