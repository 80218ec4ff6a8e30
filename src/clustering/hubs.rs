//! Hub passes: banded clustering over already-published clusters.
//!
//! Resonance hubs group clusters whose members are mutually similar
//! (mean pairwise dot product of member vectors); dissonance hubs group
//! clusters sharing a radius band. Both read earlier cluster vectors and
//! radii; they never rewrite them.

use crate::engine::Engine;

use super::{band_values, ChildNode, Cluster, ClusterKind};

/// Band the clusters published so far by the mean pairwise dot-product
/// similarity of their members' vectors.
pub(crate) fn resonance(engine: &mut Engine) {
    if engine.clusters.len() < 2 {
        return;
    }
    let shared: &Engine = engine;
    let values: Vec<f64> = shared
        .clusters
        .iter()
        .map(|cluster| mean_pairwise_similarity(shared, cluster))
        .collect();

    publish_hubs(engine, ClusterKind::ResonanceHub, &values);
}

/// Band the clusters published so far (resonance hubs included) by their
/// radius.
pub(crate) fn dissonance(engine: &mut Engine) {
    let base = engine.clusters.len();
    if base < 2 {
        return;
    }
    let values: Vec<f64> = engine.clusters.iter().map(|c| c.radius).collect();

    publish_hubs(engine, ClusterKind::DissonanceHub, &values);
}

fn publish_hubs(engine: &mut Engine, kind: ClusterKind, values: &[f64]) {
    let mut hubs = Vec::new();
    for band in band_values(values, engine.config.include_trailing) {
        let mut hub = Cluster::new(kind);
        hub.radius = band.radius;
        hub.children = band
            .members
            .iter()
            .map(|&member| ChildNode::Cluster(member))
            .collect();
        hubs.push(hub);
    }
    engine.clusters.extend(hubs);
}

/// Mean dot product over all member pairs; fewer than two members score 0.
fn mean_pairwise_similarity(engine: &Engine, cluster: &Cluster) -> f64 {
    let vectors = cluster.child_vectors(engine);
    if vectors.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for i in 0..vectors.len() {
        for j in i + 1..vectors.len() {
            sum += vectors[i].dot(&vectors[j]);
            pairs += 1;
        }
    }
    sum / pairs as f64
}
