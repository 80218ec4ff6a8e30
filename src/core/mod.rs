//! Core data model: definitions, connections, commit and summary records,
//! and the shared node-vector representation.

pub mod types;
pub mod vector;

pub use types::{
    normalize_symbol, ChangeType, Commit, Connection, Definition, Hunk, Summary, Symbol,
};
pub use vector::{NodeVector, VECTOR_DIM};
