use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::SKY_BLUE;
use crate::analysis::StateAverage;

/// Render one bar per geography, in ranking order, as a PNG at `out_path`.
pub fn render_bar_chart(
    out_path: &Path,
    ranking: &[StateAverage],
    title: &str,
    size: (u32, u32),
) -> Result<()> {
    if ranking.is_empty() {
        bail!("nothing to chart for {}", out_path.display());
    }
    let geos: Vec<&str> = ranking.iter().map(|s| s.geo.as_str()).collect();
    let top = ranking.iter().map(|s| s.mean).fold(0.0, f64::max);
    let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(geos.as_slice().into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(geos.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(geo) => geo.to_string(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_desc("State")
        .y_desc("Average Formations")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(ranking.iter().enumerate().map(|(i, s)| {
        let right = geos.get(i + 1).map_or(SegmentValue::Last, SegmentValue::Exact);
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(&geos[i]), 0.0), (right, s.mean)],
            SKY_BLUE.filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    root.present()
        .with_context(|| format!("writing chart {}", out_path.display()))?;
    info!(path = %out_path.display(), bars = ranking.len(), "rendered bar chart");
    Ok(())
}
