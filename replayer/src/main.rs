use anyhow::Context;
use clap::Parser;
use generator::frames::build_stream;
use std::fs;
use std::path::PathBuf;
use workflow::config::ReplayConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline replayer for RTI ensemble streams")]
struct Args {
    /// Replay a captured byte stream instead of generating one
    #[arg(long)]
    file: Option<PathBuf>,
    /// Load a replay config from YAML
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    ensembles: usize,
    #[arg(long, default_value_t = 30)]
    bins: usize,
    #[arg(long, default_value_t = 4)]
    beams: usize,
    #[arg(long, default_value_t = 512)]
    chunk_size: usize,
    /// Write the run summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.scenario {
        ReplayConfig::load(path)?
    } else {
        ReplayConfig::from_args(args.ensembles, args.bins, args.beams, args.chunk_size)
    };

    let stream = if let Some(path) = &args.file {
        fs::read(path).with_context(|| format!("reading capture {}", path.display()))?
    } else {
        build_stream(&config)
    };

    let runner = Runner::new(config);
    let result = runner.execute(&stream)?;

    println!(
        "Replay -> ensembles {}, last number {}, checksum failures {}, chunks dropped {}",
        result.ensembles_decoded,
        result.last_ensemble_number,
        result.metrics.checksum_failures,
        result.metrics.chunks_dropped
    );

    if let Some(report_path) = args.report {
        let summary = serde_json::to_string_pretty(&result).context("serializing summary")?;
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&report_path, summary)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}
