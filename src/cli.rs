//! Command-line argument types and the shared pipeline driver.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::DmcConfig;
use crate::engine::Engine;
use crate::io::reader;
use crate::filter;

#[derive(Parser, Debug)]
#[command(name = "dmc")]
#[command(about = "Commit-history definition map: co-change clustering and metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Summary list JSON, ordered oldest first
    #[arg(default_value = "test/data/commit_summaries.json")]
    pub summaries: PathBuf,

    /// Commit list JSON; enables the file resolver and file clustering
    #[arg(long)]
    pub commits: Option<PathBuf>,

    /// Append the trailing element of each sorted band instead of
    /// dropping it
    #[arg(long)]
    pub include_trailing: bool,
}

#[derive(Parser, Debug)]
#[command(name = "dmc-visualize")]
#[command(about = "Run the full pipeline and write the cluster dump for the web visualiser", long_about = None)]
#[command(version)]
pub struct VisualizeCli {
    /// Summary list JSON, ordered oldest first
    #[arg(default_value = "test/data/commit_summaries.json")]
    pub summaries: PathBuf,

    /// Output path for the cluster dump
    #[arg(default_value = "test/visualizer/data.json")]
    pub output: PathBuf,

    /// Commit list JSON
    #[arg(long, default_value = "test/data/commit_data.json")]
    pub commits: PathBuf,

    /// Append the trailing element of each sorted band instead of
    /// dropping it
    #[arg(long)]
    pub include_trailing: bool,
}

/// Read, filter, ingest, resolve, and cluster. The engine comes back
/// fully populated and ready for metric queries.
pub fn run_pipeline(
    summaries_path: &Path,
    commits_path: Option<&Path>,
    config: DmcConfig,
) -> Result<Engine> {
    let mut summaries = reader::read_summaries(summaries_path)?;
    info!(count = summaries.len(), path = %summaries_path.display(), "summaries parsed");
    for summary in &mut summaries {
        filter::filter_summary(summary);
    }

    let mut engine = Engine::with_config(config);
    engine.process_summaries(summaries);

    if let Some(path) = commits_path {
        let commits = reader::read_commits(path)?;
        info!(count = commits.len(), path = %path.display(), "commits parsed");
        engine.process_commits(commits);
    }

    engine.cluster();
    Ok(engine)
}
