use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::{fractional_year, padded_range, TEAL};
use crate::analysis::NationalTrend;

/// Render the national series as a PNG line chart at `out_path`.
pub fn render_line_chart(
    out_path: &Path,
    trend: &NationalTrend,
    title: &str,
    size: (u32, u32),
) -> Result<()> {
    let points: Vec<(f64, f64)> = trend
        .points
        .iter()
        .map(|(date, v)| (fractional_year(*date), *v))
        .collect();
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0), 0.02);
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1), 0.05);

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min.min(0.0)..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Applications")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(LineSeries::new(points, TEAL.stroke_width(2)))?;

    root.present()
        .with_context(|| format!("writing chart {}", out_path.display()))?;
    info!(path = %out_path.display(), points = trend.points.len(), "rendered line chart");
    Ok(())
}
