//! # dmc
//!
//! Analyses the commit history of a software repository and produces a
//! multi-level symbolic map of its definitions: what co-changes with
//! what, when each symbol was most active, and how symbols group into
//! higher-order structures.
//!
//! Input is a chronologically ordered list of commit summaries (each
//! carrying extracted symbol lists) and, optionally, the raw commits
//! with their hunks. The engine builds a weighted co-change graph with
//! linear time decay, runs a fixed sequence of clustering passes
//! (namespace, loki, chronic, occurrence, resonance hub, dissonance hub,
//! file clustering), and scores the result with entropy gain, variance
//! gain, and silhouette metrics.
//!
//! ## Quick start
//!
//! ```
//! use dmc::core::Summary;
//! use dmc::Engine;
//!
//! let mut engine = Engine::new();
//! engine.process_summaries(vec![
//!     Summary {
//!         id: "a1b2".into(),
//!         ctag_definitions: vec!["tokenize".into(), "Parser".into()],
//!         ..Default::default()
//!     },
//!     Summary {
//!         id: "c3d4".into(),
//!         ctag_definitions: vec!["tokenize".into()],
//!         ..Default::default()
//!     },
//! ]);
//! engine.cluster();
//!
//! let stats = engine.statistics();
//! assert_eq!(stats.total_definitions, 2);
//!
//! let report = dmc::metrics::compute(&engine);
//! assert!(report.average_cluster_size >= 0.0);
//! ```

pub mod cli;
pub mod clustering;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod output;

pub use config::DmcConfig;
pub use engine::{Engine, EngineStats};
pub use errors::DmcError;
