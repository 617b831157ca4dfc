//! Bytecode compilation errors.

use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::parser::{Span, SyntaxKind};

/// Errors that can occur during bytecode emission.
///
/// The parser only hands over trees that match the grammar, so every variant
/// here means the grammar and the compiler disagree. They are defects, not
/// problems with the user's program, and retrying will not help.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A node category that has no translation rule in this position.
    #[error("no translation rule for {kind} at {span}")]
    UnexpectedNode { kind: SyntaxKind, span: Span },

    /// A list was expected but the node is not list-shaped.
    #[error("expected a list, found {kind} at {span}")]
    NotAList { kind: SyntaxKind, span: Span },

    /// A node of the right category with the wrong children or text.
    #[error("malformed {kind} at {span}: {reason}")]
    MalformedNode {
        kind: SyntaxKind,
        span: Span,
        reason: String,
    },

    /// Jump distance exceeds what an `i32` offset can hold.
    #[error("jump distance {distance} does not fit in an instruction offset")]
    JumpTooFar { distance: usize },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::UnexpectedNode { span, .. }
            | CompileError::NotAList { span, .. }
            | CompileError::MalformedNode { span, .. } => span.clone(),
            CompileError::JumpTooFar { .. } => Span::default(),
        }
    }

    /// Convert to a Diagnostic for API boundary.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            CompileError::UnexpectedNode { .. } => "C001",
            CompileError::NotAList { .. } => "C002",
            CompileError::MalformedNode { .. } => "C003",
            CompileError::JumpTooFar { .. } => "C004",
        };
        Diagnostic {
            severity: Severity::Error,
            message: self.to_string(),
            span: self.span(),
            help: vec!["This is a compiler bug; please report it with the program".to_string()],
            code: Some(code.to_string()),
        }
    }
}
