// src/plot/mod.rs
use chrono::{Datelike, NaiveDate};
use plotters::style::RGBColor;

pub mod bar;
pub mod line;

pub use bar::render_bar_chart;
pub use line::render_line_chart;

pub const TEAL: RGBColor = RGBColor(0, 128, 128);
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// `2021-04-01` → `2021.25`.
pub fn fractional_year(date: NaiveDate) -> f64 {
    date.year() as f64 + (date.month0() as f64) / 12.0
}

/// Min/max of `values`, widened by `pad` of the span on each side. A flat or
/// empty input still gets a drawable range.
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I, pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span.abs() < 1e-9 {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * pad, hi + span * pad)
}
