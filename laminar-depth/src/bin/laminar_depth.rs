//! Laminar depth for one slice.
//!
//! Reads a slice file (segmentation, cells, depth field), computes depth
//! metrics for every cell and writes a JSON report.
//!
//! Usage:
//!   laminar-depth data/sample_slice.yaml
//!   laminar-depth slice.json -c configs/config.yaml -o report.json
//!   laminar-depth slice.yaml --step-size 0.25 --max-iter 4000

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use laminar_depth::{DepthConfig, SliceInput, SliceReport, depths_for_slice, slice_resolution};

/// Streamline-based laminar depth of cells in a cortical slice
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slice file (YAML, or JSON with a .json extension)
    slice: PathBuf,

    /// Configuration file path (defaults to configs/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report output path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the streamline step size
    #[arg(long)]
    step_size: Option<f64>,

    /// Override the streamline iteration limit
    #[arg(long)]
    max_iter: Option<usize>,
}

fn load_config(args: &Args) -> Result<DepthConfig, String> {
    let mut config = match &args.config {
        Some(path) => DepthConfig::load(path).map_err(|e| e.to_string())?,
        None => DepthConfig::load_default().map_err(|e| e.to_string())?,
    };

    if let Some(step_size) = args.step_size {
        config.streamline.step_size = step_size;
    }
    if let Some(max_iter) = args.max_iter {
        config.streamline.max_iter = max_iter;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(args)?;
    let input = SliceInput::load(&args.slice).map_err(|e| e.to_string())?;
    let resolution = slice_resolution(&input, &config).map_err(|e| e.to_string())?;

    info!("laminar-depth starting");
    info!("  Slice: {}", args.slice.display());
    info!("  Species: {}", input.species);
    info!("  Resolution: {}", resolution);
    info!(
        "  Streamline: step_size {}, max_iter {}",
        config.streamline.step_size, config.streamline.max_iter
    );

    let depths = depths_for_slice(&input, &config, &config.reference)
        .map_err(|e| format!("Slice failed: {} [{}]", e, e.code()))?;

    let report = SliceReport::new(&input, resolution, depths);
    if report.error_count > 0 {
        warn!(
            "{} of {} cells failed",
            report.error_count, report.cell_count
        );
    }

    match &args.output {
        Some(path) => {
            report.save(path).map_err(|e| e.to_string())?;
            info!("Report written to {}", path.display());
        }
        None => write_stdout(&report)?,
    }
    Ok(())
}

fn write_stdout(report: &SliceReport) -> Result<(), String> {
    let json = report.to_json().map_err(|e| e.to_string())?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(|e| e.to_string())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
