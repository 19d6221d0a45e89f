//! coil-field: CLI tool for evaluating the axial field of a bifilar coil pair

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use coil_field::{compute_field_with, render_panel, CoilParams, SampleGrid, SessionConfig, Summation};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "coil-field")]
#[command(about = "Compute the on-axis magnetic field of a bifilar coil pair")]
#[command(version)]
struct Args {
    /// JSON session config (grid, params, summation); flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Coil spacing in m
    #[arg(long)]
    spacing: Option<f64>,

    /// Turns per coil
    #[arg(long)]
    turns: Option<u32>,

    /// Loop radius in m
    #[arg(long)]
    radius: Option<f64>,

    /// Current in A (negative reverses the flow)
    #[arg(long, allow_hyphen_values = true)]
    current: Option<f64>,

    /// Start of the axial window in m
    #[arg(long, allow_hyphen_values = true)]
    z_min: Option<f64>,

    /// End of the axial window in m
    #[arg(long, allow_hyphen_values = true)]
    z_max: Option<f64>,

    /// Number of sample points
    #[arg(long)]
    samples: Option<usize>,

    /// Per-turn summation strategy
    #[arg(long, value_enum)]
    summation: Option<SummationArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the formula panel to stderr
    #[arg(long)]
    panel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SummationArg {
    Accumulate,
    Scale,
}

impl From<SummationArg> for Summation {
    fn from(arg: SummationArg) -> Self {
        match arg {
            SummationArg::Accumulate => Summation::Accumulate,
            SummationArg::Scale => Summation::Scale,
        }
    }
}

fn build_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => SessionConfig::default(),
    };

    let p = &mut config.params;
    p.spacing = args.spacing.unwrap_or(p.spacing);
    p.turns = args.turns.unwrap_or(p.turns);
    p.radius = args.radius.unwrap_or(p.radius);
    p.current = args.current.unwrap_or(p.current);

    let g = &mut config.grid;
    g.z_min = args.z_min.unwrap_or(g.z_min);
    g.z_max = args.z_max.unwrap_or(g.z_max);
    g.samples = args.samples.unwrap_or(g.samples);

    if let Some(summation) = args.summation {
        config.summation = summation.into();
    }

    config.params.validate().context("Invalid coil parameters")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    if args.panel {
        eprintln!("{}", render_panel()?);
    }

    let params: CoilParams = config.params;
    let grid = SampleGrid::from_spec(&config.grid);
    let curve = compute_field_with(&params, &grid, config.summation);

    let mut body = Vec::new();
    match args.format {
        OutputFormat::Csv => curve.write_csv(&mut body)?,
        OutputFormat::Json => serde_json::to_writer_pretty(&mut body, &curve.to_json())?,
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &body)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            eprintln!("Wrote {} samples ({}): {:?}", curve.len(), params, path);
        }
        None => std::io::stdout().write_all(&body)?,
    }

    Ok(())
}
