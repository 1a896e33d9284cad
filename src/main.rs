use anyhow::Result;
use bfs_analysis::{
    config::{load_config, ReportConfig},
    report::{self, RunOptions},
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reshape Census Business Formation Statistics and report national and state trends"
)]
struct Args {
    /// Wide BFS monthly CSV
    #[arg(short, long, default_value = "data/bfs_monthly.csv")]
    input: PathBuf,
    /// Where charts and summary.json go
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
    /// JSON file overriding report filters and chart sizes
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Also write the cleaned long table as Parquet
    #[arg(long)]
    export_parquet: Option<PathBuf>,
    /// Skip chart rendering
    #[arg(long)]
    no_plots: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) options ──────────────────────────────────────────────────
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    let opts = RunOptions {
        input: args.input,
        output_dir: args.output_dir,
        export_parquet: args.export_parquet,
        render_charts: !args.no_plots,
        config,
    };
    info!(input = %opts.input.display(), output = %opts.output_dir.display(), "startup");

    // ─── 3) run the pipeline ─────────────────────────────────────────
    match report::run(&opts)? {
        Some(_) => info!("done"),
        None => info!("no input; nothing to report"),
    }
    Ok(())
}
