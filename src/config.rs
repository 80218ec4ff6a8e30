//! Engine tuning knobs.
//!
//! There is no configuration file and no environment lookup beyond
//! `RUST_LOG`; the CLI maps flags onto this struct explicitly.

/// Options threaded through every clustering pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmcConfig {
    /// Append the final sorted element to the last band of every banded
    /// pass. Off by default: the historical algorithm drops it, and the
    /// published expectations are calibrated against that behaviour.
    pub include_trailing: bool,
}

impl DmcConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailing(mut self, include_trailing: bool) -> Self {
        self.include_trailing = include_trailing;
        self
    }
}
