//! Common type definitions used across the codebase

use serde::Serialize;

/// A symbol is the original textual identifier of a definition.
pub type Symbol = String;

/// Normalize a symbol for naming-convention equivalence: strip underscores
/// and lower-case letters. Used only to decide equivalence, never to rename.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// An edge from a definition to a summary time-slot, carrying the
/// time-decayed mass that this occurrence contributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    /// Index of the summary this edge points to.
    pub index: usize,
    /// Accumulated time-decayed weight.
    pub weight: f64,
}

/// A definition tracked by the engine: a function, class, or file,
/// identified by its original symbol.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Definition {
    pub symbol: Symbol,
    /// One connection per summary in which the symbol appears.
    pub connections: Vec<Connection>,
    /// Occurrence intensity normalised against the theoretical maximum
    /// weight, in `[0, 1]`.
    pub commit_frequency: f64,
    /// Number of clusters this definition was absorbed into, on the same
    /// `[0, 1]` scale.
    pub cluster_frequency: f64,
    /// Weighted centre of mass along the commit axis: 0 = earliest,
    /// 1 = latest.
    pub chronic_point: f64,
    /// Normalised mean of the file indices where the definition is
    /// referenced.
    pub file_vector: f64,
    /// Prior aliases, in the order they were folded in.
    pub history: Vec<Symbol>,
    /// File indices (post-reorder) in which the definition occurs.
    pub referenced: Vec<usize>,
    /// Insertion sequence number. Makes "last inserted" well-defined
    /// independently of map iteration order.
    #[serde(skip)]
    pub seq: u64,
}

impl Definition {
    pub fn new(symbol: impl Into<Symbol>, seq: u64) -> Self {
        Self {
            symbol: symbol.into(),
            seq,
            ..Default::default()
        }
    }

    /// Total edge weight across all connections.
    pub fn total_weight(&self) -> f64 {
        self.connections.iter().map(|c| c.weight).sum()
    }

    /// Add weight at a summary index, accumulating if an edge already exists.
    pub fn connect(&mut self, index: usize, weight: f64) {
        if let Some(existing) = self.connections.iter_mut().find(|c| c.index == index) {
            existing.weight += weight;
        } else {
            self.connections.push(Connection { index, weight });
        }
    }
}

/// The kind of change a hunk records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl ChangeType {
    /// Parse the `file_status` field of the commit-list JSON. Unrecognised
    /// statuses fall back to `Modified`.
    pub fn parse(status: &str) -> Self {
        match status {
            "added" => Self::Added,
            "deleted" => Self::Deleted,
            "renamed" => Self::Renamed,
            _ => Self::Modified,
        }
    }
}

impl Default for ChangeType {
    fn default() -> Self {
        Self::Modified
    }
}

/// A file-local change record. Consumed only by the file resolver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hunk {
    pub file: String,
    pub change_type: ChangeType,
    pub old_start: u64,
    pub old_lines: u64,
    pub new_start: u64,
    pub new_lines: u64,
    pub old_text: String,
    pub new_text: String,
}

/// A raw commit record carrying hunks. Shares its `id` with the
/// corresponding summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub hunks: Vec<Hunk>,
    /// Back-filled from the summary list by the file resolver.
    pub summary_index: Option<usize>,
}

/// An LLM-processed commit record carrying extracted symbol lists.
/// Distinct from the raw [`Commit`] record with hunks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub id: String,
    pub original_message: String,
    pub new_message: String,
    pub hunk_summaries: Vec<String>,
    pub ctag_definitions: Vec<String>,
    pub regex_definitions: Vec<String>,
    /// Assigned by insertion order.
    pub time_index: usize,
}
