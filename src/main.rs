use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

use ap_triage::core::RuleEngine;
use ap_triage::io::{OutputConfig, run_batch};

/// Sort accounts-payable invoices into exception buckets
#[derive(Parser)]
#[command(name = "ap-triage", version)]
#[command(about = "Triage AP invoices into exception buckets and owner queues", long_about = None)]
struct Cli {
    /// Input CSV with one invoice per row
    input: PathBuf,

    /// Directory for triage_results.csv and summary.json (created if absent)
    out_dir: PathBuf,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("ap-triage started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn run(cli: &Cli) -> Result<()> {
    let engine = RuleEngine::standard();
    debug!(rules = ?engine.rule_names(), "rule order");

    let report = run_batch(&cli.input, &cli.out_dir, &engine, &OutputConfig::default())
        .with_context(|| format!("failed to triage {}", cli.input.display()))?;

    info!(
        invoices = report.summary.total_invoices,
        exceptions = report.summary.exception_count(),
        at_risk = %report.summary.total_amount_at_risk,
        "batch complete"
    );
    println!("Wrote results to {}", cli.out_dir.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
