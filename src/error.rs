//! Error types for SDS.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Every variant is fatal to the current invocation; [`SdsError::exit_code`]
//! gives the process status each one terminates with.

use crate::range::RangeViolation;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Result type alias for SDS operations.
pub type Result<T> = std::result::Result<T, SdsError>;

/// Errors that can occur in SDS.
#[derive(Debug, Error)]
pub enum SdsError {
    /// Malformed range expression.
    #[error("{}", render_syntax_error(.expr, .offset, .message))]
    RangeSyntax {
        /// The complete `NAME[RANGE]` or `NAME(RANGE)` text as typed.
        expr: String,
        /// Byte offset of the offending character within `expr`.
        offset: usize,
        /// Human readable cause.
        message: String,
    },

    /// A parsed range does not fit the variable it was applied to.
    #[error("{}", render_violations(.violations))]
    InvalidRange {
        /// Variable the range was checked against.
        variable: String,
        /// Every violation found, in dimension order.
        violations: Vec<RangeViolation>,
    },

    /// Variable lookup failed.
    #[error("{}: no variable '{name}' found", .file.display())]
    NoSuchVariable {
        /// File that was searched.
        file: PathBuf,
        /// Name asked for.
        name: String,
    },

    /// Attribute lookup failed.
    #[error("{}", render_missing_attribute(.file, .attribute, .variable.as_deref()))]
    NoSuchAttribute {
        /// File that was searched.
        file: PathBuf,
        /// Name asked for.
        attribute: String,
        /// `None` for global attributes.
        variable: Option<String>,
    },

    /// Failed to open a data file.
    #[error("{}: error opening file ({reason})", .path.display())]
    FileOpen {
        /// Path as given.
        path: PathBuf,
        /// Why the reader refused it.
        reason: String,
    },

    /// Failed to read from a NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Values of this type cannot be printed.
    #[error("variable '{variable}' has type {dtype}, which has no printable values")]
    UnsupportedType {
        /// Variable asked for.
        variable: String,
        /// Its type name.
        dtype: String,
    },

    /// Bad command line that clap itself accepts.
    #[error("{0}")]
    Usage(String),

    /// Subcommand is not one the dispatcher knows about.
    #[error("Invalid command '{0}'")]
    UnknownCommand(String),

    /// The sub-tool could not be started.
    #[error("exec()ing '{command}': {source}")]
    Spawn {
        /// Program that failed to start.
        command: String,
        /// OS error from the spawn.
        #[source]
        source: io::Error,
    },

    /// None of the pager candidates could be started.
    #[error("failed to exec pager '{last}': {source}", last = .tried.last().map(String::as_str).unwrap_or("?"))]
    PagerUnavailable {
        /// Every program that was attempted, in order.
        tried: Vec<String>,
        /// OS error from the last attempt.
        #[source]
        source: io::Error,
    },

    /// Forwarding sub-tool output failed for a reason other than the reader going away.
    #[error("writing output from command: {0}")]
    Relay(#[source] io::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SdsError {
    /// Create a RangeSyntax error.
    pub fn range_syntax(expr: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self::RangeSyntax {
            expr: expr.into(),
            offset,
            message: message.into(),
        }
    }

    /// Create a Spawn error.
    pub fn spawn(command: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileOpen { .. } => 254,
            Self::NoSuchVariable { .. } => 253,
            Self::NoSuchAttribute { .. } => 252,
            _ => 255,
        }
    }
}

impl From<netcdf::Error> for SdsError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}

fn render_syntax_error(expr: &str, offset: &usize, message: &str) -> String {
    let offset = (*offset).min(expr.len());
    let prefix = expr.get(..offset).unwrap_or(expr);
    // "in " precedes the expression on the first line
    let pad = " ".repeat(prefix.width() + 3);
    format!("in {}\n{}^\nparse error: {}", expr, pad, message)
}

fn render_violations(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_missing_attribute(file: &Path, attribute: &str, variable: Option<&str>) -> String {
    match variable {
        Some(var) => format!(
            "{}: attribute '{}' not found for variable '{}'",
            file.display(),
            attribute,
            var
        ),
        None => format!("{}: global attribute '{}' not found", file.display(), attribute),
    }
}
