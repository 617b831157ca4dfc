//! Public error types for the Lauren API.
//!
//! Compilation fails in one of two ways: the source does not match the
//! grammar (reported before any emission starts), or the compiler meets a
//! tree it has no rule for, which is a defect rather than a user mistake.

use core::fmt;

use thiserror::Error;

use crate::compiler::CompileError;
use crate::parser::{ParseError, Span};

/// Public error type for all Lauren operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text does not match the grammar. No bytecode is produced.
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// The compiler met a tree shape it does not handle.
    #[error("internal compiler error: {0}")]
    Compile(#[from] CompileError),
}

impl Error {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Syntax(err) => err.to_diagnostic(),
            Error::Compile(err) => err.to_diagnostic(),
        }
    }

    /// Source text the error refers to, when the error carries it.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Syntax(err) => Some(&err.source),
            Error::Compile(_) => None,
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Help text suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
///
/// Compilation only ever fails, so every diagnostic is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}
