//! somgrid CLI - train a self-organizing map on a delimited dataset.
//!
//! Reads one record per line (comma-separated real numbers, optional
//! trailing integer label), trains, and prints the per-cell occupancy
//! and majority-label grids.

use clap::Parser;
use log::error;
use somgrid::{Result, SomConfig, SomEngine, DEFAULT_DIMENSION, EMPTY_CELL_LABEL};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "somgrid")]
#[command(version)]
#[command(about = "Self-organizing map trainer", long_about = None)]
struct Cli {
    /// Input data file (one record per line, comma-separated)
    input: PathBuf,

    /// Treat the trailing column of each record as an integer label
    #[arg(short, long)]
    labels: bool,

    /// Grid dimension (the grid is dimension x dimension)
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,

    /// Number of training steps
    #[arg(short = 'n', long, default_value_t = 10_000)]
    steps: usize,

    /// Initial learning rate, decaying linearly to zero
    #[arg(short, long, default_value_t = 0.5)]
    rate: f64,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the trained node weights as CSV, one node per line
    #[arg(long)]
    dump_weights: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SomConfig::square(cli.dimension);
    config.seed = cli.seed;

    let mut engine = SomEngine::from_delimited_file(&cli.input, cli.labels, &config)?;
    engine.train(cli.steps, cli.rate)?;

    let mapping = engine.build_mapping()?;

    println!("cell occupancy ({}x{}):", mapping.rows(), mapping.cols());
    for row in 0..mapping.rows() {
        let line: Vec<String> = (0..mapping.cols())
            .map(|col| format!("{:>5}", mapping.cell(row, col).len()))
            .collect();
        println!("{}", line.join(" "));
    }

    if cli.labels {
        let majorities = engine.majority_labels()?;
        let cols = engine.map().cols;
        println!("majority labels ({} = empty cell):", EMPTY_CELL_LABEL);
        for chunk in majorities.chunks(cols) {
            let line: Vec<String> = chunk.iter().map(|l| format!("{:>5}", l)).collect();
            println!("{}", line.join(" "));
        }
    }

    if let Some(path) = &cli.dump_weights {
        let mut file = File::create(path)?;
        for weights in engine.map().weight_matrix() {
            let fields: Vec<String> = weights.iter().map(f64::to_string).collect();
            writeln!(file, "{}", fields.join(","))?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if let Err(err) = run(&cli) {
        error!("{err}");
        process::exit(1);
    }
}
