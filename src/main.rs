//! `dmc` CLI entry point: parse the summary list, run the engine, and
//! print statistics and clustering metrics.

use anyhow::Result;
use clap::Parser;
use dmc::cli::{run_pipeline, Cli};
use dmc::observability::init_tracing;
use dmc::{metrics, output, DmcConfig};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = DmcConfig::new().with_trailing(cli.include_trailing);
    let engine = run_pipeline(&cli.summaries, cli.commits.as_deref(), config)?;

    let stats = engine.statistics();
    let report = metrics::compute(&engine);
    output::print_report(&stats, &report);

    Ok(())
}
