//! Fixed-width vector representation shared by every node kind.
//!
//! Definitions, clusters, and contexts all expose the same real-valued
//! vector so the clustering passes and quality metrics can treat them
//! uniformly. The width is fixed at compile time; there is no dynamic
//! dimension anywhere in the engine.

use serde::Serialize;

use super::types::Definition;

/// Width of every node vector. Components are
/// `[commit_frequency, cluster_frequency, chronic_point, file_vector]`.
pub const VECTOR_DIM: usize = 4;

/// A point in `[0, 1]^4` (cluster vectors are L2-normalised sums, so their
/// components stay in the unit interval as well).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NodeVector(pub [f64; VECTOR_DIM]);

impl NodeVector {
    pub const ZERO: NodeVector = NodeVector([0.0; VECTOR_DIM]);

    pub fn dot(&self, other: &NodeVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared Euclidean distance.
    pub fn distance_sq(&self, other: &NodeVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &NodeVector) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub fn add(&self, other: &NodeVector) -> NodeVector {
        let mut out = [0.0; VECTOR_DIM];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] + other.0[i];
        }
        NodeVector(out)
    }

    /// L2 normalisation. The zero vector stays zero.
    pub fn normalized(&self) -> NodeVector {
        let mag = self.magnitude();
        if mag == 0.0 {
            return NodeVector::ZERO;
        }
        let mut out = self.0;
        for slot in out.iter_mut() {
            *slot /= mag;
        }
        NodeVector(out)
    }

    /// Component-wise sum of `vectors`, L2-normalised. Zero input (or all
    /// zero vectors) yields the zero vector.
    pub fn normalized_sum<'a>(vectors: impl IntoIterator<Item = &'a NodeVector>) -> NodeVector {
        let sum = vectors
            .into_iter()
            .fold(NodeVector::ZERO, |acc, v| acc.add(v));
        sum.normalized()
    }

    /// Arithmetic mean of `vectors`; zero input yields the zero vector.
    pub fn centroid(vectors: &[NodeVector]) -> NodeVector {
        if vectors.is_empty() {
            return NodeVector::ZERO;
        }
        let sum = vectors.iter().fold(NodeVector::ZERO, |acc, v| acc.add(v));
        let mut out = sum.0;
        for slot in out.iter_mut() {
            *slot /= vectors.len() as f64;
        }
        NodeVector(out)
    }
}

impl Definition {
    /// The definition's point in vector space.
    pub fn vector(&self) -> NodeVector {
        NodeVector([
            self.commit_frequency,
            self.cluster_frequency,
            self.chronic_point,
            self.file_vector,
        ])
    }
}
