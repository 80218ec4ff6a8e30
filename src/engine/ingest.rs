//! Summary ingestion: builds the definition table and the raw
//! time-decayed connection edges.

use tracing::debug;

use super::statistics::connection_weight;
use super::Engine;
use crate::core::{Definition, Summary};

/// Consume the ordered summary list. The caller guarantees chronological
/// order of insertion, so `time_index` is assigned by position.
pub(crate) fn process(engine: &mut Engine, mut summaries: Vec<Summary>) {
    let total = summaries.len();
    for (index, summary) in summaries.iter_mut().enumerate() {
        summary.time_index = index;
    }

    for summary in &summaries {
        let weight = connection_weight(summary.time_index, total);
        for symbol in summary
            .ctag_definitions
            .iter()
            .chain(summary.regex_definitions.iter())
        {
            if symbol.is_empty() {
                continue;
            }
            add_definition(engine, symbol, summary.time_index, weight);
        }
    }

    debug!(
        summaries = total,
        definitions = engine.definitions.len(),
        "ingest complete"
    );
    engine.summaries = summaries;
}

/// Look up or create the definition for `symbol` and accumulate the edge
/// to the summary at `time_index`. Repeat occurrences within one summary
/// accumulate weight once per occurrence.
fn add_definition(engine: &mut Engine, symbol: &str, time_index: usize, weight: f64) {
    if !engine.definitions.contains_key(symbol) {
        let seq = engine.next_seq;
        engine.next_seq += 1;
        engine
            .definitions
            .insert(symbol.to_string(), Definition::new(symbol, seq));
    }
    let definition = engine
        .definitions
        .get_mut(symbol)
        .expect("definition inserted above");
    definition.connect(time_index, weight);
}
