//! Per-definition statistics: the linear decay weight function,
//! `commit_frequency`, and `chronic_point`.
//!
//! Recomputed once after ingest and again whenever the file resolver adds
//! file definitions, so stale values never survive a pipeline stage.

use serde::Serialize;

use super::Engine;
use crate::core::Definition;

/// The canonical weight function used throughout: `w(t, N) = (t+1)/N` for
/// `N > 1`, else `1`. Every summary gets a non-zero weight; later
/// summaries weigh more.
pub fn connection_weight(time_index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    (time_index + 1) as f64 / total as f64
}

/// Sum of `w(t, N)` over the whole history: the weight a definition would
/// accumulate by appearing in every summary exactly once.
pub fn max_possible_weight(total: usize) -> f64 {
    (0..total).map(|t| connection_weight(t, total)).sum()
}

/// Recompute `commit_frequency` and `chronic_point` for every symbol and
/// file definition.
pub(crate) fn recompute(engine: &mut Engine) {
    let total = engine.summaries.len();
    if total == 0 {
        return;
    }
    let max_weight = max_possible_weight(total);

    for definition in engine.definitions.values_mut() {
        update_definition(definition, total, max_weight);
    }
    for file in engine.files.iter_mut() {
        update_definition(file, total, max_weight);
    }
}

fn update_definition(definition: &mut Definition, total: usize, max_weight: f64) {
    let definition_weight = definition.total_weight();
    definition.commit_frequency = if max_weight > 0.0 {
        definition_weight / max_weight
    } else {
        0.0
    };
    definition.chronic_point = chronic_point(definition, total);
}

/// Weighted centre of mass along the commit axis, normalised to `[0, 1]`.
/// A single-summary history pins every definition to 0.
fn chronic_point(definition: &Definition, total: usize) -> f64 {
    if total <= 1 || definition.connections.is_empty() {
        return 0.0;
    }
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for connection in &definition.connections {
        let normalized_time = connection.index as f64 / (total - 1) as f64;
        weighted_sum += normalized_time * connection.weight;
        total_weight += connection.weight;
    }
    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Aggregate counts and averages over the current engine population.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineStats {
    pub total_definitions: usize,
    pub total_files: usize,
    pub total_connections: usize,
    pub total_summaries: usize,
    pub total_commits: usize,
    pub total_clusters: usize,
    pub average_occurrence: f64,
    pub average_chronic_point: f64,
    pub average_connections_per_definition: f64,
}

pub(crate) fn collect(engine: &Engine) -> EngineStats {
    let total_definitions = engine.definitions.len();
    let total_connections: usize = engine
        .definitions
        .values()
        .map(|d| d.connections.len())
        .sum();
    let sum_occurrence: f64 = engine
        .definitions
        .values()
        .map(|d| d.commit_frequency)
        .sum();
    let sum_chronic: f64 = engine.definitions.values().map(|d| d.chronic_point).sum();

    let denom = total_definitions as f64;
    EngineStats {
        total_definitions,
        total_files: engine.files.len(),
        total_connections,
        total_summaries: engine.summaries.len(),
        total_commits: engine.commits.len(),
        total_clusters: engine.clusters.len(),
        average_occurrence: if total_definitions > 0 {
            sum_occurrence / denom
        } else {
            0.0
        },
        average_chronic_point: if total_definitions > 0 {
            sum_chronic / denom
        } else {
            0.0
        },
        average_connections_per_definition: if total_definitions > 0 {
            total_connections as f64 / denom
        } else {
            0.0
        },
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
    fn weight_is_linear_decay() {
        assert_eq!(connection_weight(0, 4), 0.25);
        assert_eq!(connection_weight(1, 4), 0.5);
        assert_eq!(connection_weight(2, 4), 0.75);
        assert_eq!(connection_weight(3, 4), 1.0);
    }

    #[test]
    fn weight_for_degenerate_histories_is_one() {
        assert_eq!(connection_weight(0, 1), 1.0);
        assert_eq!(connection_weight(0, 0), 1.0);
    }

    #[test]
    fn max_possible_weight_sums_the_series() {
        assert_eq!(max_possible_weight(4), 2.5);
        assert_eq!(max_possible_weight(1), 1.0);
        assert_eq!(max_possible_weight(0), 0.0);
    }

    #[test]
    fn commit_frequency_is_normalised_against_maximum() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            summary("c1", &["alpha", "beta"]),
            summary("c2", &["alpha"]),
            summary("c3", &["gamma"]),
            summary("c4", &["gamma"]),
        ]);
        // alpha at t0 and t1: (0.25 + 0.5) / 2.5 = 0.3
        let alpha = engine.definition("alpha").unwrap();
        assert!((alpha.commit_frequency - 0.3).abs() < 1e-12);
        assert!(alpha.commit_frequency >= 0.0 && alpha.commit_frequency <= 1.0);
    }

    #[test]
    fn single_summary_pins_chronic_point_to_zero() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![summary("c1", &["alpha"])]);
        let alpha = engine.definition("alpha").unwrap();
        assert_eq!(alpha.commit_frequency, 1.0);
        assert_eq!(alpha.chronic_point, 0.0);
    }

    #[test]
    fn chronic_point_of_symbol_in_both_of_two_summaries_is_interior() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![summary("c1", &["alpha"]), summary("c2", &["alpha"])]);
        let alpha = engine.definition("alpha").unwrap();
        assert!(alpha.chronic_point > 0.0 && alpha.chronic_point < 1.0);
    }

    #[test]
    fn empty_engine_reports_all_zero_statistics() {
        let engine = Engine::new();
        let stats = engine.statistics();
        assert_eq!(stats.total_definitions, 0);
        assert_eq!(stats.total_connections, 0);
        assert_eq!(stats.average_occurrence, 0.0);
        assert_eq!(stats.average_chronic_point, 0.0);
        assert_eq!(stats.average_connections_per_definition, 0.0);
    }
}
