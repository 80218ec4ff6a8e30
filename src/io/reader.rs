//! Input decoding for the two JSON streams: the summary list and the
//! commit list.
//!
//! Array order is significant: a summary's `time_index` is its position.
//! Unknown fields are skipped, missing fields default to empty, and CRLF
//! is normalised to LF before parsing. A decode failure surfaces the file
//! path and the position serde_json reports.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::core::{ChangeType, Commit, Hunk, Summary};
use crate::errors::DmcError;

/// One element of the summary-list JSON, in its wire shape.
#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
    /// Per-hunk summaries.
    #[serde(default)]
    summaries: Vec<String>,
    /// The rewritten commit message.
    #[serde(default)]
    commit_summary: String,
    /// ctags-extracted symbols.
    #[serde(default)]
    definitions: Vec<String>,
    /// Regex-extracted symbols from the key points.
    #[serde(default)]
    key_points: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCommit {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    hunks: Vec<RawHunk>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHunk {
    #[serde(default)]
    file: String,
    #[serde(default)]
    file_status: String,
    #[serde(default)]
    old_start: u64,
    #[serde(default)]
    old_lines: u64,
    #[serde(default)]
    new_start: u64,
    #[serde(default)]
    new_lines: u64,
    #[serde(default)]
    old_text: String,
    #[serde(default)]
    new_text: String,
}

/// Read and decode a summary list. `time_index[i] = i`.
pub fn read_summaries(path: &Path) -> Result<Vec<Summary>> {
    let content = crate::io::read_file(path)?;
    parse_summaries(&content, path)
}

/// Read and decode a commit list.
pub fn read_commits(path: &Path) -> Result<Vec<Commit>> {
    let content = crate::io::read_file(path)?;
    parse_commits(&content, path)
}

pub fn parse_summaries(content: &str, path: &Path) -> Result<Vec<Summary>> {
    let content = normalize_newlines(content);
    let raw: Vec<RawSummary> =
        serde_json::from_str(&content).map_err(|e| decode_error(e, path))?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(time_index, raw)| Summary {
            id: raw.id,
            original_message: raw.message,
            new_message: raw.commit_summary,
            hunk_summaries: raw.summaries,
            ctag_definitions: raw.definitions,
            regex_definitions: raw.key_points,
            time_index,
        })
        .collect())
}

pub fn parse_commits(content: &str, path: &Path) -> Result<Vec<Commit>> {
    let content = normalize_newlines(content);
    let raw: Vec<RawCommit> =
        serde_json::from_str(&content).map_err(|e| decode_error(e, path))?;
    Ok(raw
        .into_iter()
        .map(|raw| Commit {
            id: raw.id,
            message: raw.message,
            hunks: raw.hunks.into_iter().map(convert_hunk).collect(),
            summary_index: None,
        })
        .collect())
}

fn convert_hunk(raw: RawHunk) -> Hunk {
    Hunk {
        file: raw.file,
        change_type: ChangeType::parse(&raw.file_status),
        old_start: raw.old_start,
        old_lines: raw.old_lines,
        new_start: raw.new_start,
        new_lines: raw.new_lines,
        old_text: raw.old_text,
        new_text: raw.new_text,
    }
}

fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n")
}

fn decode_error(err: serde_json::Error, path: &Path) -> anyhow::Error {
    DmcError::parse_with_context(err.to_string(), path, err.line(), err.column()).into_anyhow()
}
