//! Cluster dump writer.
//!
//! Emits the tagged cluster forest as pretty-printed JSON: every root
//! cluster with its kind, scaled radius, vector, and children. Nested
//! clusters are inlined, leaf definitions appear as
//! `{symbol, vector, connections}`.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::clustering::{ChildNode, Cluster};
use crate::core::NodeVector;
use crate::engine::Engine;

/// Internal radii live in `[0, 1]`; the dump scales them up for human
/// readability.
const RADIUS_SCALE: f64 = 1000.0;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum DumpNode {
    Cluster(ClusterDump),
    Leaf(LeafDump),
}

#[derive(Debug, Serialize)]
struct ClusterDump {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    radius: f64,
    vector: NodeVector,
    definitions: Vec<DumpNode>,
}

#[derive(Debug, Serialize)]
struct LeafDump {
    symbol: String,
    vector: NodeVector,
    connections: usize,
}

/// Render the cluster forest: every cluster that no other cluster claims
/// as a child, in publication order.
pub fn render_cluster_dump(engine: &Engine) -> Result<String> {
    let absorbed: HashSet<usize> = engine
        .clusters()
        .iter()
        .flat_map(|c| c.children.iter())
        .filter_map(|child| match child {
            ChildNode::Cluster(index) => Some(*index),
            ChildNode::Definition(_) => None,
        })
        .collect();

    let roots: Vec<DumpNode> = engine
        .clusters()
        .iter()
        .enumerate()
        .filter(|(index, _)| !absorbed.contains(index))
        .map(|(_, cluster)| DumpNode::Cluster(dump_cluster(engine, cluster)))
        .collect();

    Ok(serde_json::to_string_pretty(&roots)?)
}

/// Write the dump to `path`, creating parent directories as needed.
pub fn write_cluster_dump(engine: &Engine, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        crate::io::ensure_dir(parent)?;
    }
    crate::io::write_file(path, &render_cluster_dump(engine)?)
}

fn dump_cluster(engine: &Engine, cluster: &Cluster) -> ClusterDump {
    let definitions = cluster
        .children
        .iter()
        .filter_map(|child| dump_child(engine, child))
        .collect();

    ClusterDump {
        kind: cluster.kind.name(),
        symbol: cluster.label.clone(),
        radius: cluster.radius * RADIUS_SCALE,
        vector: cluster.vector(engine),
        definitions,
    }
}

fn dump_child(engine: &Engine, child: &ChildNode) -> Option<DumpNode> {
    match child {
        ChildNode::Definition(symbol) => {
            let definition = engine.definition(symbol)?;
            Some(DumpNode::Leaf(LeafDump {
                symbol: definition.symbol.clone(),
                vector: definition.vector(),
                connections: definition.connections.len(),
            }))
        }
        ChildNode::Cluster(index) => {
            let cluster = engine.clusters().get(*index)?;
            Some(DumpNode::Cluster(dump_cluster(engine, cluster)))
        }
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

    fn clustered_engine() -> Engine {
        let mut engine = Engine::new();
        let summaries = (0..8)
            .map(|t| {
                let symbols: Vec<String> = if t < 4 {
                    vec![format!("early_a{t}"), "shared".to_string()]
                } else {
                    vec![format!("late_b{t}")]
                };
                let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
                summary(&format!("c{t}"), &refs)
            })
            .collect();
        engine.process_summaries(summaries);
        engine.cluster();
        engine
    }

    #[test]
    fn dump_is_valid_json_with_scaled_radius() {
        let engine = clustered_engine();
        let dump = render_cluster_dump(&engine).unwrap();
        let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
        let array = value.as_array().unwrap();
        assert!(!array.is_empty());
        for entry in array {
            assert!(entry.get("type").is_some());
            let radius = entry["radius"].as_f64().unwrap();
            assert!(radius >= 0.0 && radius <= RADIUS_SCALE);
            assert_eq!(entry["vector"].as_array().unwrap().len(), 4);
        }
    }

    #[test]
    fn absorbed_clusters_do_not_appear_at_top_level() {
        let engine = clustered_engine();
        let dump = render_cluster_dump(&engine).unwrap();
        let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
        // Hubs absorb the base clusters, so the dump's top level must be
        // strictly smaller than the full cluster list whenever hubs exist.
        let has_hub = engine
            .clusters()
            .iter()
            .any(|c| matches!(c.kind.name(), "RESONANCE_HUB" | "DISSONANCE_HUB"));
        if has_hub {
            assert!(value.as_array().unwrap().len() < engine.clusters().len());
        }
    }

    #[test]
    fn leaf_definitions_carry_symbol_vector_and_connection_count() {
        let engine = clustered_engine();
        let dump = render_cluster_dump(&engine).unwrap();
        assert!(dump.contains("\"symbol\""));
        assert!(dump.contains("\"connections\""));
    }

    #[test]
    fn dump_uses_two_space_indentation() {
        let engine = clustered_engine();
        let dump = render_cluster_dump(&engine).unwrap();
        assert!(dump.lines().any(|l| l.starts_with("  \"") || l.starts_with("  {")));
    }
}
