//! File resolver: consumes the commit stream, detects renames, and
//! synthesises file definitions.
//!
//! Commits are distinct from summaries: commits carry hunks, summaries
//! carry extracted symbols; the two share their `id`. File definitions
//! land in the engine's separate file list, which the file clustering
//! pass later reorders.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::statistics::connection_weight;
use super::Engine;
use crate::core::{ChangeType, Commit, Definition, Hunk};

/// Per-path bookkeeping while grouping commits by touched file.
#[derive(Debug, Default, Clone)]
struct FileEntry {
    /// Positions into the commit list, ascending, no duplicates.
    commit_positions: Vec<usize>,
    /// Rename trail: earlier paths, oldest first.
    history: Vec<String>,
}

impl FileEntry {
    fn touch(&mut self, position: usize) {
        if self.commit_positions.last() != Some(&position) {
            self.commit_positions.push(position);
        }
    }

    fn merge(&mut self, other: FileEntry, old_path: &str) {
        for position in other.commit_positions {
            if !self.commit_positions.contains(&position) {
                self.commit_positions.push(position);
            }
        }
        self.commit_positions.sort_unstable();
        self.history.extend(other.history);
        self.history.push(old_path.to_string());
    }
}

/// Resolve the commit stream into file definitions.
pub(crate) fn resolve(engine: &mut Engine, mut commits: Vec<Commit>) {
    back_fill_summary_indices(engine, &mut commits);

    // Group commits by every file they touch. BTreeMap-like ordering is
    // not needed here; the final file list is sorted before insertion.
    let mut file_map: HashMap<String, FileEntry> = HashMap::new();
    for (position, commit) in commits.iter().enumerate() {
        for hunk in &commit.hunks {
            if hunk.file.is_empty() {
                continue;
            }
            file_map
                .entry(hunk.file.clone())
                .or_default()
                .touch(position);
        }
    }

    for commit in &commits {
        for (old_path, new_path) in detect_renames(commit) {
            let Some(old_entry) = file_map.remove(&old_path) else {
                continue;
            };
            file_map
                .entry(new_path.clone())
                .or_default()
                .merge(old_entry, &old_path);
            debug!(from = %old_path, to = %new_path, commit = %commit.id, "rename folded");
        }
    }

    let total = engine.summaries.len();
    let mut paths: Vec<String> = file_map.keys().cloned().collect();
    paths.sort_unstable();

    engine.files.clear();
    for path in paths {
        let entry = file_map.remove(&path).expect("path collected from map");
        let seq = engine.next_seq;
        engine.next_seq += 1;
        let mut file = Definition::new(path, seq);
        file.history = entry.history;
        for position in entry.commit_positions {
            if let Some(summary_index) = commits[position].summary_index {
                file.connect(summary_index, connection_weight(summary_index, total));
            }
        }
        engine.files.push(file);
    }

    debug!(files = engine.files.len(), commits = commits.len(), "file resolution complete");
    engine.commits = commits;
}

fn back_fill_summary_indices(engine: &Engine, commits: &mut [Commit]) {
    let index_map: HashMap<&str, usize> = engine
        .summaries
        .iter()
        .map(|s| (s.id.as_str(), s.time_index))
        .collect();

    for commit in commits.iter_mut() {
        commit.summary_index = index_map.get(commit.id.as_str()).copied();
        if commit.summary_index.is_none() {
            warn!(id = %commit.id, "commit has no matching summary, excluded from weighting");
        }
    }
}

/// Within a single commit, a `deleted` hunk and an `added` hunk that agree
/// on start line and line count are treated as a rename of the deleted
/// path to the added path. The match is on line counts only; no content
/// comparison is performed.
fn detect_renames(commit: &Commit) -> Vec<(String, String)> {
    let deleted: Vec<&Hunk> = commit
        .hunks
        .iter()
        .filter(|h| h.change_type == ChangeType::Deleted)
        .collect();
    let added: Vec<&Hunk> = commit
        .hunks
        .iter()
        .filter(|h| h.change_type == ChangeType::Added)
        .collect();

    let mut pairs = Vec::new();
    let mut used_added = vec![false; added.len()];

    for del in &deleted {
        let candidates: Vec<usize> = added
            .iter()
            .enumerate()
            .filter(|(i, add)| {
                !used_added[*i]
                    && del.old_start == add.new_start
                    && del.old_lines == add.new_lines
                    && del.file != add.file
            })
            .map(|(i, _)| i)
            .collect();

        if candidates.len() > 1 {
            warn!(
                commit = %commit.id,
                from = %del.file,
                candidates = candidates.len(),
                "ambiguous rename: multiple added hunks match the same line counts"
            );
        }
        if let Some(&chosen) = candidates.first() {
            used_added[chosen] = true;
            pairs.push((del.file.clone(), added[chosen].file.clone()));
        }
    }
    pairs
}
