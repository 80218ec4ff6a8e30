//! Loki clustering: folds naming-convention variants of the same symbol
//! into a single inheritor definition.
//!
//! `my_func`, `MyFunc`, and `myFunc` all normalise to `myfunc`; the
//! last-inserted spelling survives on the assumption that newer names
//! represent current usage. Insertion order is tracked explicitly on each
//! definition, so the fold is independent of map iteration order.

use std::collections::HashMap;

use tracing::debug;

use crate::core::{normalize_symbol, Symbol};
use crate::engine::Engine;

pub(crate) fn run(engine: &mut Engine) {
    let mut classes: HashMap<String, Vec<(u64, Symbol)>> = HashMap::new();
    for (symbol, definition) in engine.definitions.iter() {
        classes
            .entry(normalize_symbol(symbol))
            .or_default()
            .push((definition.seq, symbol.clone()));
    }

    for (_, mut members) in classes {
        if members.len() < 2 {
            continue;
        }
        members.sort_by_key(|(seq, _)| *seq);
        let (_, inheritor_symbol) = members.pop().expect("class has at least two members");

        let mut folded_connections = Vec::new();
        let mut folded_aliases = Vec::new();
        for (_, alias) in members {
            let Some(alias_definition) = engine.definitions.remove(&alias) else {
                continue;
            };
            folded_connections.extend(alias_definition.connections);
            folded_aliases.push(alias);
        }

        let Some(inheritor) = engine.definitions.get_mut(&inheritor_symbol) else {
            continue;
        };
        for connection in folded_connections {
            inheritor.connect(connection.index, connection.weight);
        }
        debug!(
            inheritor = %inheritor_symbol,
            aliases = folded_aliases.len(),
            "naming variants folded"
        );
        inheritor.history.extend(folded_aliases);
    }
}
