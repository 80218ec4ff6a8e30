//! Quality metrics over the current node population: entropy gain,
//! variance gain, silhouette score, average cluster size, and the
//! time-axis similarity matrix.
//!
//! All metrics tolerate degenerate input (fewer than two definitions, a
//! single cluster, zero summaries) by returning zero rather than
//! raising. Queried before clustering they report baseline
//! (definition-only) values.

use serde::Serialize;

use crate::core::{Definition, NodeVector};
use crate::engine::Engine;

/// The clustering quality summary printed by the CLI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsReport {
    /// Pairwise dispersion of definitions minus that of clusters;
    /// positive means clustering reduces dispersion.
    pub entropy_gain: f64,
    /// `1 − intra/total` variance; 1 is perfectly tight clusters.
    pub variance_gain: f64,
    /// Classic silhouette in `[-1, 1]`; above 0.4 reads as good.
    pub silhouette: f64,
    /// Mean child count over non-empty clusters.
    pub average_cluster_size: f64,
}

pub fn compute(engine: &Engine) -> MetricsReport {
    MetricsReport {
        entropy_gain: entropy_gain(engine),
        variance_gain: variance_gain(engine),
        silhouette: silhouette_score(engine),
        average_cluster_size: average_cluster_size(engine),
    }
}

/// Mean pairwise squared distance over definitions minus the same
/// quantity over cluster vectors.
pub fn entropy_gain(engine: &Engine) -> f64 {
    let definitions = definition_vectors(engine);
    if definitions.len() < 2 {
        return 0.0;
    }
    let clusters: Vec<NodeVector> = engine
        .clusters()
        .iter()
        .map(|c| c.vector(engine))
        .collect();
    let cluster_dispersion = if clusters.len() < 2 {
        0.0
    } else {
        mean_pairwise_distance_sq(&clusters)
    };
    mean_pairwise_distance_sq(&definitions) - cluster_dispersion
}

/// `1 − intra/total`, where `total` is the variance of definition vectors
/// around their centroid and `intra` the mean squared distance of every
/// clustered point to its cluster centroid.
pub fn variance_gain(engine: &Engine) -> f64 {
    variance_gain_from(&definition_vectors(engine), &member_groups(engine))
}

/// Classic silhouette `(b − a) / max(a, b)` with Euclidean distance,
/// averaged over the members of all populated clusters. Requires at
/// least two populated clusters; otherwise 0.
pub fn silhouette_score(engine: &Engine) -> f64 {
    silhouette_from_groups(&member_groups(engine))
}

/// Mean `|children|` over clusters with non-empty children.
pub fn average_cluster_size(engine: &Engine) -> f64 {
    let sizes: Vec<usize> = engine
        .clusters()
        .iter()
        .map(|c| c.children.len())
        .filter(|&n| n > 0)
        .collect();
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
}

/// Cosine similarity between two definitions' time-axis weight vectors.
pub fn cosine_similarity(engine: &Engine, a: &Definition, b: &Definition) -> f64 {
    cosine(
        &engine.connection_weights(a),
        &engine.connection_weights(b),
    )
}

/// `n × n` cosine similarities over definitions sorted by symbol, so the
/// indexing is stable between runs.
pub fn similarity_matrix(engine: &Engine) -> Vec<Vec<f64>> {
    let definitions = engine.definitions_vector();
    let n = definitions.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in i + 1..n {
            let similarity = cosine_similarity(engine, definitions[i].1, definitions[j].1);
            matrix[i][j] = similarity;
            matrix[j][i] = similarity;
        }
    }
    matrix
}

/// Standard cosine over dense weight vectors. Mismatched lengths and
/// degenerate (zero) magnitudes return 0.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}

fn definition_vectors(engine: &Engine) -> Vec<NodeVector> {
    engine.definitions().values().map(|d| d.vector()).collect()
}

/// Member vectors per cluster, skipping clusters that resolve to no
/// vectors.
fn member_groups(engine: &Engine) -> Vec<Vec<NodeVector>> {
    engine
        .clusters()
        .iter()
        .map(|c| c.child_vectors(engine))
        .filter(|g| !g.is_empty())
        .collect()
}

fn mean_pairwise_distance_sq(vectors: &[NodeVector]) -> f64 {
    let n = vectors.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for i in 0..n {
        for j in i + 1..n {
            sum += vectors[i].distance_sq(&vectors[j]);
            pairs += 1;
        }
    }
    sum / pairs as f64
}

pub(crate) fn variance_gain_from(definitions: &[NodeVector], groups: &[Vec<NodeVector>]) -> f64 {
    if definitions.is_empty() || groups.is_empty() {
        return 0.0;
    }
    let centroid = NodeVector::centroid(definitions);
    let total = definitions
        .iter()
        .map(|v| v.distance_sq(&centroid))
        .sum::<f64>()
        / definitions.len() as f64;

    let mut intra_sum = 0.0;
    let mut points = 0usize;
    for group in groups {
        let group_centroid = NodeVector::centroid(group);
        for vector in group {
            intra_sum += vector.distance_sq(&group_centroid);
            points += 1;
        }
    }
    let intra = if points > 0 {
        intra_sum / points as f64
    } else {
        0.0
    };

    if total == 0.0 {
        return if intra == 0.0 { 0.0 } else { 1.0 };
    }
    1.0 - intra / total
}

pub(crate) fn silhouette_from_groups(groups: &[Vec<NodeVector>]) -> f64 {
    if groups.len() < 2 {
        return 0.0;
    }

    let mut score_sum = 0.0;
    let mut points = 0usize;

    for (own_index, group) in groups.iter().enumerate() {
        for (member_index, vector) in group.iter().enumerate() {
            let a = mean_distance_excluding(vector, group, member_index);
            let b = groups
                .iter()
                .enumerate()
                .filter(|(other_index, _)| *other_index != own_index)
                .map(|(_, other)| mean_distance(vector, other))
                .fold(f64::INFINITY, f64::min);

            let denom = a.max(b);
            score_sum += if denom == 0.0 { 0.0 } else { (b - a) / denom };
            points += 1;
        }
    }

    if points == 0 {
        0.0
    } else {
        score_sum / points as f64
    }
}

fn mean_distance(vector: &NodeVector, group: &[NodeVector]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    group.iter().map(|other| vector.distance(other)).sum::<f64>() / group.len() as f64
}

fn mean_distance_excluding(vector: &NodeVector, group: &[NodeVector], skip: usize) -> f64 {
    if group.len() < 2 {
        return 0.0;
    }
    let sum: f64 = group
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != skip)
        .map(|(_, other)| vector.distance(other))
        .sum();
    sum / (group.len() - 1) as f64
}
