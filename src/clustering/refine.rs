//! Gradient-descent refinement hook.
//!
//! Reserved for whole-program threshold optimisation. The contract: a
//! filled-in implementation may only refine cluster membership. It must
//! never alter definitions, connections, or the meaning of any published
//! metric, and it must not violate any engine invariant.

use tracing::trace;

use crate::engine::Engine;

pub(crate) fn run(engine: &mut Engine) {
    trace!(clusters = engine.clusters.len(), "refinement hook (no-op)");
}

#[cfg(test)]
mod tests {
    use crate::core::Summary;
    use crate::engine::Engine;

    #[test]
    fn refinement_leaves_membership_untouched() {
        let mut engine = Engine::new();
        engine.process_summaries(vec![
            Summary {
                id: "c1".into(),
                ctag_definitions: vec!["alpha".into(), "beta".into()],
                ..Default::default()
            },
            Summary {
                id: "c2".into(),
                ctag_definitions: vec!["alpha".into(), "gamma".into()],
                ..Default::default()
            },
        ]);
        engine.cluster();

        let before: Vec<usize> = engine.clusters().iter().map(|c| c.children.len()).collect();
        super::run(&mut engine);
        let after: Vec<usize> = engine.clusters().iter().map(|c| c.children.len()).collect();
        assert_eq!(before, after);
    }
}
