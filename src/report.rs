// src/report.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::analysis::{national_trend, state_performance, StateAverage, Summary};
use crate::config::ReportConfig;
use crate::plot::{render_bar_chart, render_line_chart};
use crate::process::{load_and_prepare, write::write_long_parquet, CleanStats, Dataset};

pub const NATIONAL_TITLE: &str = "U.S. Business Applications Over Time (Seasonally Adjusted)";
pub const NATIONAL_CHART: &str = "national_trend.png";
pub const STATES_CHART: &str = "top_states.png";
pub const SUMMARY_FILE: &str = "summary.json";

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub export_parquet: Option<PathBuf>,
    pub render_charts: bool,
    pub config: ReportConfig,
}

/// Machine-readable record of a run, written as `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub wide_rows: usize,
    pub cleaning: CleanStats,
    pub national_summary: Option<Summary>,
    pub top_states: Option<Vec<StateAverage>>,
}

/// National series: print its summary (or a warning) and chart it.
pub fn plot_national_trends(
    ds: &Dataset,
    cfg: &ReportConfig,
    chart_dir: Option<&Path>,
) -> Result<Option<Summary>> {
    let Some(trend) = national_trend(&ds.observations, &cfg.national) else {
        warn!(series = %cfg.national.series, geo = %cfg.national.geo, "no national rows");
        println!(
            "Warning: National application data ({}) not found.",
            cfg.national.series
        );
        return Ok(None);
    };

    if let Some(dir) = chart_dir {
        render_line_chart(
            &dir.join(NATIONAL_CHART),
            &trend,
            NATIONAL_TITLE,
            cfg.charts.line_size,
        )?;
    }

    let summary = trend.summary.rounded(2);
    println!("Summary Statistics for National Applications:");
    print!("{}", summary);
    Ok(Some(summary))
}

/// Rank geographies by mean formations and chart the top of the list.
pub fn analyze_state_performance(
    ds: &Dataset,
    cfg: &ReportConfig,
    chart_dir: Option<&Path>,
) -> Result<Option<Vec<StateAverage>>> {
    let Some(ranking) = state_performance(&ds.observations, &cfg.states) else {
        info!(series = %cfg.states.series, "no state rows; skipping ranking");
        return Ok(None);
    };

    if let Some(dir) = chart_dir {
        let title = format!(
            "Top {} States by Average Monthly Business Formations",
            cfg.states.top_n
        );
        render_bar_chart(
            &dir.join(STATES_CHART),
            &ranking,
            &title,
            cfg.charts.bar_size,
        )?;
    }
    Ok(Some(ranking))
}

/// Console table for the ranking, headed like the bar chart.
pub fn ranking_table(top_n: usize, ranking: &[StateAverage]) -> String {
    let mut out = format!("Top {} State Averages:\n", top_n);
    for state in ranking {
        out.push_str(&format!("{}\n", state));
    }
    out
}

/// Write `report` to `<dir>/summary.json` via a temp file + rename.
pub fn write_report<P: AsRef<Path>>(dir: P, report: &Report) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let path = dir.join(SUMMARY_FILE);
    let tmp_path = dir.join(format!(".{}.tmp", SUMMARY_FILE));

    let mut tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    serde_json::to_writer_pretty(&mut tmp, report).context("serializing report JSON")?;
    tmp.write_all(b"\n")?;

    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(path)
}

/// Load → reshape → clean → analyse → plot. `Ok(None)` when the input is missing.
pub fn run(opts: &RunOptions) -> Result<Option<Report>> {
    let Some(ds) = load_and_prepare(&opts.input)? else {
        return Ok(None);
    };

    fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("creating output directory {}", opts.output_dir.display()))?;
    let chart_dir = opts.render_charts.then_some(opts.output_dir.as_path());

    if let Some(pq) = &opts.export_parquet {
        write_long_parquet(&ds.observations, pq)?;
    }

    let national_summary = plot_national_trends(&ds, &opts.config, chart_dir)?;
    let top_states = analyze_state_performance(&ds, &opts.config, chart_dir)?;

    if let Some(ranking) = &top_states {
        print!("\n{}", ranking_table(opts.config.states.top_n, ranking));
    }

    let report = Report {
        input: opts.input.display().to_string(),
        wide_rows: ds.wide_rows,
        cleaning: ds.stats,
        national_summary,
        top_states,
    };
    let path = write_report(&opts.output_dir, &report)?;
    info!(path = %path.display(), "wrote report");
    Ok(Some(report))
}
