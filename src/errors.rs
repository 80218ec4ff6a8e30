//! Categorized error types for the engine and its drivers.
//!
//! I/O and parse failures surface immediately with path context and stop
//! the CLI. Consistency errors are bugs in the input graph: they are
//! logged, the offending node is skipped, and processing continues.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Unified error type for dmc operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DmcError {
    /// File system I/O errors (read, write, permissions).
    Io {
        message: String,
        path: Option<PathBuf>,
    },
    /// Input decoding failures, with the position serde reports.
    Parse {
        message: String,
        path: Option<PathBuf>,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Graph consistency violations: out-of-range connection index,
    /// empty cluster, dangling child reference.
    Consistency { message: String },
    /// Catch-all for other errors.
    Other(String),
}

impl DmcError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: None,
            line: None,
            column: None,
        }
    }

    pub fn parse_with_context(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            path: Some(path.into()),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Io { message, .. } => message,
            Self::Parse { message, .. } => message,
            Self::Consistency { message } => message,
            Self::Other(message) => message,
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => path.as_ref(),
            Self::Parse { path, .. } => path.as_ref(),
            _ => None,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::Parse { .. } => "Parse",
            Self::Consistency { .. } => "Consistency",
            Self::Other(_) => "Error",
        }
    }
}

impl fmt::Display for DmcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { message, path } => {
                write!(f, "I/O error: {}", message)?;
                if let Some(p) = path {
                    write!(f, " (path: {})", p.display())?;
                }
                Ok(())
            }
            Self::Parse {
                message,
                path,
                line,
                column,
            } => {
                write!(f, "Parse error: {}", message)?;
                if let Some(p) = path {
                    write!(f, " in {}", p.display())?;
                }
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, " at line {}, column {}", l, c)?;
                }
                Ok(())
            }
            Self::Consistency { message } => write!(f, "Consistency error: {}", message),
            Self::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for DmcError {}

impl From<io::Error> for DmcError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl DmcError {
    /// Convenience for anyhow-based call sites.
    pub fn into_anyhow(self) -> anyhow::Error {
        anyhow::Error::from(self)
    }
}
