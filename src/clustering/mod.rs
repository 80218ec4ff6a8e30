//! The six ordered clustering passes, plus file clustering and the
//! refinement hook.
//!
//! Passes run in a fixed sequence (namespace, loki, chronic, occurrence,
//! resonance hub, dissonance hub, file clustering, refinement) and later
//! passes consume the products of earlier ones: the hub passes band over
//! already-published clusters, never over raw definitions. A published
//! cluster is immutable; later passes read its vector and radius but never
//! rewrite them.

pub mod banded;
pub mod file_pass;
pub mod hubs;
pub mod loki;
pub mod namespace;
pub mod refine;

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{Definition, NodeVector, Symbol};
use crate::engine::Engine;

pub use banded::{band_values, Band};
pub use namespace::Context;

/// Grouping dimension a cluster was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClusterKind {
    Chronic,
    Occurrence,
    DissonanceHub,
    ResonanceHub,
    Context,
    File,
}

impl ClusterKind {
    /// Wire name used in the cluster dump.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chronic => "CHRONIC",
            Self::Occurrence => "OCCURRENCE",
            Self::DissonanceHub => "DISSONANCE_HUB",
            Self::ResonanceHub => "RESONANCE_HUB",
            Self::Context => "CONTEXT",
            Self::File => "FILE",
        }
    }
}

/// A cluster child is polymorphic: either a definition (by symbol, a
/// non-owning reference into the engine's table) or an earlier cluster
/// (by index into the engine's cluster sequence). Hubs of clusters fall
/// out of the second variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildNode {
    Definition(Symbol),
    Cluster(usize),
}

/// A published group of child nodes with the maximum in-band gap as its
/// radius. Immutable after publication; the vector is computed on first
/// access and cached for the cluster's lifetime.
#[derive(Debug)]
pub struct Cluster {
    pub kind: ClusterKind,
    pub radius: f64,
    pub children: Vec<ChildNode>,
    /// Set for file clusters: the path the cluster represents.
    pub label: Option<String>,
    vector: OnceCell<NodeVector>,
}

impl Cluster {
    pub fn new(kind: ClusterKind) -> Self {
        Self {
            kind,
            radius: 0.0,
            children: Vec::new(),
            label: None,
            vector: OnceCell::new(),
        }
    }

    pub fn with_label(kind: ClusterKind, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(kind)
        }
    }

    /// L2-normalised component-wise sum of the children's vectors. Zero
    /// children yield the zero vector.
    pub fn vector(&self, engine: &Engine) -> NodeVector {
        *self
            .vector
            .get_or_init(|| NodeVector::normalized_sum(self.child_vectors(engine).iter()))
    }

    /// Vectors of the direct children, skipping dangling references.
    pub fn child_vectors(&self, engine: &Engine) -> Vec<NodeVector> {
        self.children
            .iter()
            .filter_map(|child| child_vector(engine, child))
            .collect()
    }
}

/// Resolve a child node's vector. A dangling reference is a consistency
/// error: it is logged and skipped, never fatal.
pub fn child_vector(engine: &Engine, child: &ChildNode) -> Option<NodeVector> {
    match child {
        ChildNode::Definition(symbol) => match engine.definition(symbol) {
            Some(definition) => Some(definition.vector()),
            None => {
                warn!(%symbol, "cluster child refers to a missing definition, skipping");
                None
            }
        },
        ChildNode::Cluster(index) => match engine.clusters().get(*index) {
            Some(cluster) => Some(cluster.vector(engine)),
            None => {
                warn!(index, "cluster child refers to a missing cluster, skipping");
                None
            }
        },
    }
}

/// Run every pass in order.
pub(crate) fn run(engine: &mut Engine) {
    engine.clusters.clear();
    engine.contexts.clear();

    namespace::run(engine);
    loki::run(engine);
    // Both passes above merge connections; frequencies and chronic points
    // must be fresh before anything bands on them.
    crate::engine::statistics::recompute(engine);

    definition_band_pass(engine, ClusterKind::Chronic, |d| d.chronic_point);
    definition_band_pass(engine, ClusterKind::Occurrence, |d| d.commit_frequency);
    update_cluster_frequency(engine);

    hubs::resonance(engine);
    hubs::dissonance(engine);

    file_pass::run(engine);
    update_cluster_frequency(engine);

    refine::run(engine);

    info!(
        clusters = engine.clusters.len(),
        contexts = engine.contexts.len(),
        "clustering complete"
    );
}

/// Chronic and occurrence clustering share everything but the axis:
/// banded clustering over a per-definition scalar, children keyed by
/// symbol in table order (ties in the sort keep that order, so the result
/// is deterministic).
fn definition_band_pass(engine: &mut Engine, kind: ClusterKind, axis: fn(&Definition) -> f64) {
    if engine.definitions.len() < 2 {
        return;
    }
    let mut symbols: Vec<Symbol> = Vec::with_capacity(engine.definitions.len());
    let mut values: Vec<f64> = Vec::with_capacity(engine.definitions.len());
    for (symbol, definition) in engine.definitions.iter() {
        symbols.push(symbol.clone());
        values.push(axis(definition));
    }

    for band in band_values(&values, engine.config.include_trailing) {
        let mut cluster = Cluster::new(kind);
        cluster.radius = band.radius;
        cluster.children = band
            .members
            .iter()
            .map(|&m| ChildNode::Definition(symbols[m].clone()))
            .collect();
        engine.clusters.push(cluster);
    }
}

/// Refresh `cluster_frequency`: the number of published clusters that
/// absorbed each definition, normalised by the published cluster count.
fn update_cluster_frequency(engine: &mut Engine) {
    let total = engine.clusters.len();
    let mut counts: HashMap<Symbol, usize> = HashMap::new();
    for cluster in &engine.clusters {
        for child in &cluster.children {
            if let ChildNode::Definition(symbol) = child {
                *counts.entry(symbol.clone()).or_default() += 1;
            }
        }
    }
    for (symbol, definition) in engine.definitions.iter_mut() {
        definition.cluster_frequency = if total > 0 {
            counts.get(symbol).copied().unwrap_or(0) as f64 / total as f64
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Summary;

    fn summary(id: &str, symbols: &[&str]) -> Summary {
        Summary {
            id: id.to_string(),
            ctag_definitions: symbols.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_engine_clustering_is_a_no_op() {
        let mut engine = Engine::new();
        engine.cluster();
        assert!(engine.clusters().is_empty());
    }

    #[test]
    fn single_definition_produces_no_clusters() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![summary("c1", &["lonely"])]);
        engine.cluster();
        assert!(engine.clusters().is_empty());
    }

    #[test]
    fn published_clusters_are_never_empty() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            summary("c1", &["alpha", "beta", "gamma"]),
            summary("c2", &["alpha", "beta"]),
            summary("c3", &["delta", "epsilon"]),
            summary("c4", &["delta"]),
        ]);
        engine.cluster();
        for cluster in engine.clusters() {
            assert!(!cluster.children.is_empty());
        }
    }

    #[test]
    fn cluster_frequency_stays_in_unit_interval() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            summary("c1", &["alpha", "beta", "gamma", "delta"]),
            summary("c2", &["alpha", "beta"]),
            summary("c3", &["gamma", "delta", "epsilon"]),
        ]);
        engine.cluster();
        for definition in engine.definitions().values() {
            assert!(definition.cluster_frequency >= 0.0);
            assert!(definition.cluster_frequency <= 1.0);
        }
    }

    #[test]
    fn cluster_vector_is_cached_and_normalised() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            summary("c1", &["alpha", "beta", "gamma"]),
            summary("c2", &["alpha", "beta"]),
            summary("c3", &["delta", "epsilon"]),
            summary("c4", &["delta"]),
        ]);
        engine.cluster();

        for cluster in engine.clusters() {
            let first = cluster.vector(&engine);
            let second = cluster.vector(&engine);
            assert_eq!(first, second);
            let mag = first.magnitude();
            assert!(mag == 0.0 || (mag - 1.0).abs() < 1e-9);
        }
    }
}
