//! File clustering: resolves each file's definitions, reorders the file
//! list by mutual similarity, and derives every definition's
//! `file_vector`.

use std::collections::HashSet;

use tracing::debug;

use crate::core::Symbol;
use crate::engine::Engine;
use crate::metrics::cosine;

use super::{ChildNode, Cluster, ClusterKind};

pub(crate) fn run(engine: &mut Engine) {
    let file_count = engine.files.len();
    if file_count == 0 {
        return;
    }

    let shared: &Engine = engine;

    // Membership is decided before the reorder: a definition belongs to a
    // file when their connection indices intersect.
    let index_sets: Vec<HashSet<usize>> = shared
        .files
        .iter()
        .map(|f| f.connections.iter().map(|c| c.index).collect())
        .collect();
    let members: Vec<Vec<Symbol>> = index_sets
        .iter()
        .map(|set| {
            shared
                .definitions
                .iter()
                .filter(|(_, d)| d.connections.iter().any(|c| set.contains(&c.index)))
                .map(|(s, _)| s.clone())
                .collect()
        })
        .collect();

    // Pairwise cosine over the time-axis weight vectors decides each
    // file's mean similarity to all others, and with it the new order.
    let weight_vectors: Vec<Vec<f64>> = shared
        .files
        .iter()
        .map(|f| shared.connection_weights(f))
        .collect();
    let mut mean_similarity = vec![0.0; file_count];
    if file_count > 1 {
        for i in 0..file_count {
            for j in i + 1..file_count {
                let similarity = cosine(&weight_vectors[i], &weight_vectors[j]);
                mean_similarity[i] += similarity;
                mean_similarity[j] += similarity;
            }
        }
        for value in mean_similarity.iter_mut() {
            *value /= (file_count - 1) as f64;
        }
    }

    let mut order: Vec<usize> = (0..file_count).collect();
    order.sort_by(|&a, &b| {
        mean_similarity[b]
            .total_cmp(&mean_similarity[a])
            .then_with(|| shared.files[a].symbol.cmp(&shared.files[b].symbol))
    });

    // One cluster per file in the new order; every resolved definition
    // records the file's post-reorder index.
    for (new_index, &old_index) in order.iter().enumerate() {
        let mut cluster =
            Cluster::with_label(ClusterKind::File, engine.files[old_index].symbol.clone());
        for symbol in &members[old_index] {
            cluster.children.push(ChildNode::Definition(symbol.clone()));
            if let Some(definition) = engine.definitions.get_mut(symbol) {
                definition.referenced.push(new_index);
            }
        }
        if !cluster.children.is_empty() {
            engine.clusters.push(cluster);
        }
    }

    let mut reordered = Vec::with_capacity(file_count);
    let mut files = std::mem::take(&mut engine.files);
    // Drain in the new order without cloning the definitions.
    let mut slots: Vec<Option<crate::core::Definition>> = files.drain(..).map(Some).collect();
    for &old_index in &order {
        if let Some(file) = slots[old_index].take() {
            reordered.push(file);
        }
    }
    engine.files = reordered;

    for definition in engine.definitions.values_mut() {
        definition.file_vector = if definition.referenced.is_empty() || file_count < 2 {
            0.0
        } else {
            let sum: usize = definition.referenced.iter().sum();
            let mean = sum as f64 / (definition.referenced.len() as f64 * (file_count - 1) as f64);
            mean.clamp(0.0, 1.0)
        };
    }

    debug!(files = file_count, "file clustering complete");
}

#[cfg(test)]
mod tests {
    use crate::core::{ChangeType, Commit, Hunk, Summary};
    use crate::engine::Engine;

    fn summary(id: &str, symbols: &[&str]) -> Summary {
        Summary {
            id: id.to_string(),
            ctag_definitions: symbols.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn touch(id: &str, file: &str) -> Commit {
        Commit {
            id: id.to_string(),
            hunks: vec![Hunk {
                file: file.to_string(),
                change_type: ChangeType::Modified,
                old_start: 1,
                old_lines: 1,
                new_start: 1,
                new_lines: 1,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn engine_with_two_files() -> Engine {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            summary("c1", &["alpha", "beta"]),
            summary("c2", &["alpha"]),
            summary("c3", &["gamma"]),
        ]);
        engine.process_commits(vec![
            touch("c1", "a.rs"),
            touch("c2", "a.rs"),
            touch("c3", "b.rs"),
        ]);
        engine
    }

    #[test]
    fn file_clusters_hold_the_definitions_they_touch() {
        let mut engine = engine_with_two_files();
        engine.cluster();

        let file_clusters = engine.clusters_by_kind(super::ClusterKind::File);
        assert_eq!(file_clusters.len(), 2);

        let a_cluster = file_clusters
            .iter()
            .find(|c| c.label.as_deref() == Some("a.rs"))
            .unwrap();
        let symbols: Vec<&str> = a_cluster
            .children
            .iter()
            .map(|c| match c {
                super::ChildNode::Definition(s) => s.as_str(),
                super::ChildNode::Cluster(_) => panic!("file cluster child must be a definition"),
            })
            .collect();
        assert!(symbols.contains(&"alpha"));
        assert!(symbols.contains(&"beta"));
        assert!(!symbols.contains(&"gamma"));
    }

    #[test]
    fn referenced_records_post_reorder_file_indices() {
        let mut engine = engine_with_two_files();
        engine.cluster();

        let file_count = engine.files().len();
        for definition in engine.definitions().values() {
            for &index in &definition.referenced {
                assert!(index < file_count);
            }
        }
        let gamma = engine.definition("gamma").unwrap();
        assert_eq!(gamma.referenced.len(), 1);
    }

    #[test]
    fn file_vector_stays_in_unit_interval() {
        let mut engine = engine_with_two_files();
        engine.cluster();
        for definition in engine.definitions().values() {
            assert!(definition.file_vector >= 0.0);
            assert!(definition.file_vector <= 1.0);
        }
    }

    #[test]
    fn single_file_pins_file_vector_to_zero() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![summary("c1", &["alpha"]), summary("c2", &["alpha"])]);
        engine.process_commits(vec![touch("c1", "only.rs"), touch("c2", "only.rs")]);
        engine.cluster();
        assert_eq!(engine.definition("alpha").unwrap().file_vector, 0.0);
    }
}
