//! hist-modes: maximal meaningful modes of a histogram file.

use acontrario_core::Error;
use acontrario_histogram::{read_histogram_file, write_modes_file};
use acontrario_modality::{ModeDetectorBuilder, NullObserver};
use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "use: hist-modes <hist.txt> <output.txt> [epsilon [circular]]";

#[derive(Parser)]
#[command(name = "hist-modes")]
#[command(about = "Detect the maximal meaningful modes of a histogram")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Histogram file: whitespace-separated bin counts
    input: Option<PathBuf>,

    /// Where to write the modes, one `start end` pair per line
    output: Option<PathBuf>,

    /// Expected number of false detections (default 1)
    epsilon: Option<String>,

    /// 1 if the last bin is adjacent to the first one (default 0)
    circular: Option<String>,

    /// Write a JSON report with mode statistics instead of pairs
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    match run(&cli, input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, input: &Path, output: &Path) -> anyhow::Result<()> {
    let epsilon = match cli.epsilon.as_deref() {
        Some(token) => parse_epsilon(token)?,
        None => 1.0,
    };
    let circular = match cli.circular.as_deref() {
        Some(token) => parse_circular(token)?,
        None => false,
    };

    let histogram = read_histogram_file(input)
        .with_context(|| format!("failed to read histogram {}", input.display()))?;
    tracing::info!(
        "Loaded {} from {} (fullest bin {})",
        histogram,
        input.display(),
        histogram.peak_bin()
    );

    let detector = ModeDetectorBuilder::new(NullObserver)
        .epsilon(epsilon)
        .circular(circular)
        .build();
    let result = detector.detect_modes(&histogram)?;
    tracing::info!("{}", result.summary());

    if cli.json {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(output, json)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else {
        write_modes_file(output, &result.interval_list())
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    tracing::info!("{} modes written to {}", result.mode_count(), output.display());

    Ok(())
}

fn parse_epsilon(token: &str) -> Result<f64, Error> {
    token.trim().parse().map_err(|_| Error::Parse {
        position: 3,
        token: token.to_string(),
    })
}

/// Any non-zero integer turns circular mode on
fn parse_circular(token: &str) -> Result<bool, Error> {
    token
        .trim()
        .parse::<i64>()
        .map(|flag| flag != 0)
        .map_err(|_| Error::Parse {
            position: 4,
            token: token.to_string(),
        })
}
