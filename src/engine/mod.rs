//! The abstract engine: owns every definition, file node, context, and
//! cluster for its lifetime, and drives the pipeline stages in order.
//!
//! Stage order is ingest ([`Engine::process_summaries`]), statistics,
//! file resolution ([`Engine::process_commits`]), then clustering
//! ([`Engine::cluster`]). Metrics may be queried at any point after
//! clustering; querying earlier yields baseline (definition-only) values.
//!
//! The engine is single-threaded throughout its lifecycle. Multiple
//! engines may run in parallel in separate contexts but share no state.

pub mod files;
pub mod ingest;
pub mod statistics;

use std::collections::BTreeMap;

use crate::clustering::{self, Cluster, ClusterKind, Context};
use crate::config::DmcConfig;
use crate::core::{Commit, Definition, Summary, Symbol};

pub use statistics::EngineStats;

/// The in-memory co-change graph plus everything derived from it.
///
/// Definitions live in a map keyed by symbol; clusters are held in a flat
/// sequence; child references inside clusters are non-owning indices and
/// symbols, so the whole graph is trivially serialisable and safe to
/// [`clear`](Engine::clear). A `BTreeMap` keeps iteration order
/// reproducible, which makes every downstream ordering deterministic.
#[derive(Debug, Default)]
pub struct Engine {
    pub(crate) summaries: Vec<Summary>,
    pub(crate) commits: Vec<Commit>,
    pub(crate) definitions: BTreeMap<Symbol, Definition>,
    /// File definitions, kept separate from symbol definitions. Reordered
    /// by the file clustering pass.
    pub(crate) files: Vec<Definition>,
    /// Namespace context forest.
    pub(crate) contexts: Vec<Context>,
    /// Published clusters, in publication order.
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) next_seq: u64,
    pub(crate) config: DmcConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DmcConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Ingest the ordered summary list, replacing any prior state, then
    /// compute per-definition statistics.
    pub fn process_summaries(&mut self, summaries: Vec<Summary>) {
        self.clear();
        ingest::process(self, summaries);
        statistics::recompute(self);
    }

    /// Run the file resolver over the commit stream: back-fill summary
    /// indices, detect renames, synthesise file definitions, and refresh
    /// statistics so the new nodes pick up their frequencies.
    pub fn process_commits(&mut self, commits: Vec<Commit>) {
        files::resolve(self, commits);
        statistics::recompute(self);
    }

    /// Run every clustering pass in order: namespace, loki, chronic,
    /// occurrence, resonance hub, dissonance hub, file clustering, and the
    /// refinement hook.
    pub fn cluster(&mut self) {
        clustering::run(self);
    }

    /// Release all definitions, summaries, commits, files, contexts, and
    /// clusters in one step.
    pub fn clear(&mut self) {
        self.summaries.clear();
        self.commits.clear();
        self.definitions.clear();
        self.files.clear();
        self.contexts.clear();
        self.clusters.clear();
        self.next_seq = 0;
    }

    /// Aggregate statistics for the terminal report.
    pub fn statistics(&self) -> EngineStats {
        statistics::collect(self)
    }

    pub fn config(&self) -> &DmcConfig {
        &self.config
    }

    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn definitions(&self) -> &BTreeMap<Symbol, Definition> {
        &self.definitions
    }

    pub fn definition(&self, symbol: &str) -> Option<&Definition> {
        self.definitions.get(symbol)
    }

    pub fn files(&self) -> &[Definition] {
        &self.files
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn clusters_by_kind(&self, kind: ClusterKind) -> Vec<&Cluster> {
        self.clusters.iter().filter(|c| c.kind == kind).collect()
    }

    /// Definitions sorted by symbol, for stable indexing.
    pub fn definitions_vector(&self) -> Vec<(&Symbol, &Definition)> {
        self.definitions.iter().collect()
    }

    /// Dense length-`N` weight vector over the summary axis for a
    /// definition. Connection indices outside `0..N` are skipped.
    pub fn connection_weights(&self, definition: &Definition) -> Vec<f64> {
        let total = self.summaries.len();
        let mut weights = vec![0.0; total];
        for connection in &definition.connections {
            if connection.index < total {
                weights[connection.index] = connection.weight;
            } else {
                tracing::warn!(
                    symbol = %definition.symbol,
                    index = connection.index,
                    total,
                    "connection index out of range, skipping"
                );
            }
        }
        weights
    }
}
