//! `dmc-visualize` entry point: run the full pipeline, print the report,
//! and write the cluster dump for the web visualiser.

use anyhow::Result;
use clap::Parser;
use dmc::cli::{run_pipeline, VisualizeCli};
use dmc::observability::init_tracing;
use dmc::{metrics, output, DmcConfig};

fn main() -> Result<()> {
    init_tracing();
    let cli = VisualizeCli::parse();

    let config = DmcConfig::new().with_trailing(cli.include_trailing);
    let engine = run_pipeline(&cli.summaries, Some(cli.commits.as_path()), config)?;

    let stats = engine.statistics();
    let report = metrics::compute(&engine);
    output::print_report(&stats, &report);

    output::write_cluster_dump(&engine, &cli.output)?;
    println!("Cluster dump written to {}", cli.output.display());

    Ok(())
}
