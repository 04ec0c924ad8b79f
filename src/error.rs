//! Error types for building the compiler and compiling stylesheets.
//!
//! Construction and compilation fail in different ways: [`InitError`] is a
//! configuration problem (a script resource is missing or broken) and is fatal
//! to building the compiler, while [`CompileError`] is the single kind every
//! failure inside a compile call collapses into.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while bringing up the embedded engine.
#[derive(Debug, Error)]
pub enum InitError {
    /// A script resource could not be opened or read.
    #[error("failed to load script resource `{resource}`: {source}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },

    /// The QuickJS runtime rejected an operation outside of script evaluation.
    #[error("JavaScript runtime error: {0}")]
    Runtime(#[from] rquickjs::Error),

    /// A script resource threw while being evaluated.
    #[error("script resource `{resource}` failed to evaluate: {message}")]
    Script { resource: String, message: String },

    /// The options could not be converted for the entry point.
    #[error("failed to serialize compiler options: {0}")]
    Options(#[from] serde_json::Error),

    /// The loaded scripts left no global `compile` function behind.
    #[error("loaded scripts do not define a global `compile` function")]
    MissingEntryPoint,
}

/// A failed compile call.
///
/// Whatever went wrong inside the engine (a LESS parse error, an exception in
/// one of the scripts, a result that is not a string) ends up here. When the
/// thrown value carried location details they are copied over; `cause` keeps
/// the original error rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileError {
    /// Error category reported by the compiler script (`Parse`, `Name`, ...).
    pub kind: Option<String>,
    pub message: String,
    pub filename: Option<String>,
    /// 1-based line.
    pub line: Option<u32>,
    /// 0-based column.
    pub column: Option<u32>,
    /// Source lines around the error, as reported by the script.
    pub extract: Vec<String>,
    pub cause: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        CompileError {
            cause: message.clone(),
            message,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = cause.into();
        self
    }

    /// Byte offset and length of the reported position inside `source`.
    ///
    /// Returns `None` when the error has no line or the line is past the end
    /// of `source`. A missing column points at the start of the line.
    pub fn source_offset(&self, source: &str) -> Option<(usize, usize)> {
        let index = self.line?.checked_sub(1)? as usize;
        let mut start = 0;
        let mut line_text = None;
        for (i, line) in source.split_inclusive('\n').enumerate() {
            if i == index {
                line_text = Some(line.trim_end_matches(['\n', '\r']));
                break;
            }
            start += line.len();
        }
        let line_text = line_text?;

        let column = self.column.unwrap_or(0) as usize;
        match line_text.char_indices().nth(column) {
            Some((offset, ch)) => Some((start + offset, ch.len_utf8())),
            None => Some((start + line_text.len(), 0)),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{}Error: {}", kind, self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(filename) = &self.filename {
            write!(f, " in {}", filename)?;
        }
        if let Some(line) = self.line {
            write!(f, " on line {}", line)?;
            if let Some(column) = self.column {
                write!(f, ", column {}", column + 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}

/// Errors raised by [`LessEngine`](crate::engine::LessEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Reading an input or writing an output failed.
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
