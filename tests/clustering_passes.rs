//! Pass-level behaviour: loki folding, namespace contexts, hubs, and the
//! published-cluster invariants.

use dmc::clustering::{ChildNode, ClusterKind};
use dmc::core::{normalize_symbol, Summary};
use dmc::{DmcConfig, Engine};

fn summary(id: &str, symbols: &[&str]) -> Summary {
    Summary {
        id: id.to_string(),
        ctag_definitions: symbols.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn spread_history() -> Vec<Summary> {
    (0..12)
        .map(|t| {
            let symbols: Vec<String> = if t < 4 {
                (1..=4).map(|i| format!("setup{i}")).collect()
            } else if t < 8 {
                vec![format!("bridge{t}")]
            } else {
                (1..=4).map(|i| format!("teardown{i}")).collect()
            };
            let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
            summary(&format!("c{t}"), &refs)
        })
        .collect()
}

#[test]
fn loki_fold_keeps_the_last_inserted_spelling() {
    let mut engine = Engine::new();
    engine.process_summaries(vec![
        summary("c1", &["my_func"]),
        summary("c2", &["MyFunc"]),
        summary("c3", &["myFunc"]),
    ]);
    engine.cluster();

    assert!(engine.definition("my_func").is_none());
    assert!(engine.definition("MyFunc").is_none());

    let survivor = engine.definition("myFunc").expect("inheritor survives");
    assert_eq!(
        survivor.history,
        vec!["my_func".to_string(), "MyFunc".to_string()]
    );

    let mut indices: Vec<usize> = survivor.connections.iter().map(|c| c.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn no_normalised_symbol_is_shared_after_loki() {
    let mut engine = Engine::new();
    engine.process_summaries(vec![
        summary("c1", &["read_frame", "ReadFrame", "writeFrame"]),
        summary("c2", &["readFrame", "write_frame"]),
    ]);
    engine.cluster();

    let mut normalised: Vec<String> = engine
        .definitions()
        .keys()
        .map(|s| normalize_symbol(s))
        .collect();
    let count = normalised.len();
    normalised.sort();
    normalised.dedup();
    assert_eq!(normalised.len(), count);
}

#[test]
fn namespace_pass_rekeys_scoped_symbols() {
    let mut engine = Engine::new();
    engine.process_summaries(vec![summary(
        "c1",
        &["codec::frame::encode", "codec::frame::decode", "standalone"],
    )]);
    engine.cluster();

    assert!(engine.definition("encode").is_some());
    assert!(engine.definition("decode").is_some());
    assert!(engine.definition("codec::frame::encode").is_none());

    let roots = engine.contexts();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].symbol, "codec");
    assert_eq!(roots[0].contexts.len(), 1);
    assert_eq!(roots[0].contexts[0].symbol, "frame");
    assert_eq!(roots[0].definition_count(), 2);
}

#[test]
fn every_published_cluster_has_children_and_a_unit_radius() {
    let mut engine = Engine::new();
    engine.process_summaries(spread_history());
    engine.cluster();

    assert!(!engine.clusters().is_empty());
    for cluster in engine.clusters() {
        assert!(!cluster.children.is_empty());
        assert!(cluster.radius >= 0.0 && cluster.radius <= 1.0);
    }
}

#[test]
fn definitions_join_at_most_one_cluster_per_banded_pass() {
    let mut engine = Engine::new();
    engine.process_summaries(spread_history());
    engine.cluster();

    for kind in [ClusterKind::Chronic, ClusterKind::Occurrence] {
        let mut seen = std::collections::HashSet::new();
        for cluster in engine.clusters_by_kind(kind) {
            for child in &cluster.children {
                if let ChildNode::Definition(symbol) = child {
                    assert!(
                        seen.insert(symbol.clone()),
                        "{symbol} appears twice in {kind:?} clusters"
                    );
                }
            }
        }
    }
}

#[test]
fn hub_passes_group_clusters_not_definitions() {
    let mut engine = Engine::new();
    engine.process_summaries(spread_history());
    engine.cluster();

    for kind in [ClusterKind::ResonanceHub, ClusterKind::DissonanceHub] {
        for hub in engine.clusters_by_kind(kind) {
            assert!(!hub.children.is_empty());
            for child in &hub.children {
                assert!(matches!(child, ChildNode::Cluster(_)));
            }
        }
    }
}

#[test]
fn include_trailing_keeps_the_last_sorted_element() {
    let history = spread_history();

    let mut default_engine = Engine::new();
    default_engine.process_summaries(history.clone());
    default_engine.cluster();

    let mut trailing_engine = Engine::with_config(DmcConfig::new().with_trailing(true));
    trailing_engine.process_summaries(history);
    trailing_engine.cluster();

    let count = |engine: &Engine, kind| {
        engine
            .clusters_by_kind(kind)
            .iter()
            .map(|c| c.children.len())
            .sum::<usize>()
    };

    // The trailing element lands in some chronic band instead of being
    // dropped, so membership grows.
    assert!(
        count(&trailing_engine, ClusterKind::Chronic)
            > count(&default_engine, ClusterKind::Chronic)
    );
}

#[test]
fn clusters_survive_metric_queries_unchanged() {
    let mut engine = Engine::new();
    engine.process_summaries(spread_history());
    engine.cluster();

    let before: Vec<usize> = engine.clusters().iter().map(|c| c.children.len()).collect();
    let _ = dmc::metrics::compute(&engine);
    let _ = dmc::metrics::similarity_matrix(&engine);
    let after: Vec<usize> = engine.clusters().iter().map(|c| c.children.len()).collect();
    assert_eq!(before, after);
}
