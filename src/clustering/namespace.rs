//! Namespace clustering: splits scoped symbols into a Context tree and
//! re-keys each definition under its last path segment.
//!
//! `render::html::escape` produces the contexts `render` → `html` with the
//! definition re-inserted as `escape`. Path-style symbols (`src/lib.rs`)
//! split the same way on `/`.

use tracing::debug;

use crate::core::{NodeVector, Symbol};
use crate::engine::Engine;

/// A named cluster variant representing one namespace level. Contexts
/// nest, forming a tree; leaf definitions are non-owning symbol
/// references into the engine's table.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub symbol: String,
    pub contexts: Vec<Context>,
    pub definitions: Vec<Symbol>,
}

impl Context {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// L2-normalised sum over nested contexts and leaf definitions,
    /// skipping definitions that later passes have folded away.
    pub fn vector(&self, engine: &Engine) -> NodeVector {
        let mut vectors: Vec<NodeVector> = self.contexts.iter().map(|c| c.vector(engine)).collect();
        vectors.extend(
            self.definitions
                .iter()
                .filter_map(|s| engine.definition(s))
                .map(|d| d.vector()),
        );
        NodeVector::normalized_sum(vectors.iter())
    }

    /// Number of leaf definitions in the whole subtree.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
            + self
                .contexts
                .iter()
                .map(Context::definition_count)
                .sum::<usize>()
    }
}

pub(crate) fn run(engine: &mut Engine) {
    let scoped: Vec<Symbol> = engine
        .definitions
        .keys()
        .filter(|s| s.contains("::") || s.contains('/'))
        .cloned()
        .collect();

    for symbol in scoped {
        let segments = split_segments(&symbol);
        let Some((short, path)) = segments.split_last() else {
            continue;
        };
        let Some(mut definition) = engine.definitions.remove(&symbol) else {
            continue;
        };

        if !path.is_empty() {
            attach(&mut engine.contexts, path, short);
        }

        // Re-key under the short name. A collision folds connections into
        // the existing definition and records the full path as an alias.
        match engine.definitions.get_mut(short.as_str()) {
            Some(existing) => {
                for connection in definition.connections {
                    existing.connect(connection.index, connection.weight);
                }
                existing.history.push(symbol.clone());
                debug!(path = %symbol, short = %short, "short name collision folded");
            }
            None => {
                definition.symbol = short.clone();
                engine.definitions.insert(short.clone(), definition);
            }
        }
    }
}

/// Split on `::` and `/`, dropping empty segments (`foo::`, `/lib.rs`).
fn split_segments(symbol: &str) -> Vec<String> {
    symbol
        .replace("::", "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Descend the context forest along `path`, creating levels as needed,
/// and register `leaf` at the deepest level.
fn attach(roots: &mut Vec<Context>, path: &[String], leaf: &str) {
    let mut node = ensure_level(roots, &path[0]);
    for segment in &path[1..] {
        node = ensure_level(&mut node.contexts, segment);
    }
    if !node.definitions.iter().any(|s| s == leaf) {
        node.definitions.push(leaf.to_string());
    }
}

fn ensure_level<'a>(contexts: &'a mut Vec<Context>, symbol: &str) -> &'a mut Context {
    let position = match contexts.iter().position(|c| c.symbol == symbol) {
        Some(position) => position,
        None => {
            contexts.push(Context::new(symbol));
            contexts.len() - 1
        }
    };
    &mut contexts[position]
}
