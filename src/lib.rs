//! Lauren - bytecode compiler for a small expression-oriented language
//!
//! # Overview
//!
//! Lauren programs are newline-separated expressions: literals, names,
//! assignments (`name: value`), invocations (`f(a b)`), lambdas
//! (`{ ?x ?y body }`), `forever` loops and `if`/`elseif`/`else` chains.
//! This crate turns source text into a flat instruction stream for a stack
//! machine. Running that stream is left to the host.
//!
//! # Quick Start
//!
//! ```
//! use lauren::{BytecodeCompiler, CompileOptions, Op, Value};
//!
//! let compiler = BytecodeCompiler::new(CompileOptions::default());
//! let code = compiler.compile("a1: 2").unwrap();
//!
//! let ops: Vec<_> = code.ops().cloned().collect();
//! assert_eq!(
//!     ops,
//!     vec![
//!         Op::Push(Value::Number(2.0)),
//!         Op::SetEnv("a1".to_string()),
//!         Op::Return,
//!     ]
//! );
//! ```
//!
//! # Errors
//!
//! Source that does not match the grammar fails with [`Error::Syntax`] and
//! yields no code. [`Error::Compile`] means the compiler met a tree it has
//! no rule for, which is a bug. Either renders through [`render_error`].

mod error_renderer;

pub use error_renderer::{render_error, render_error_to, render_error_to_string, render_error_to_string_no_color};

// Re-export public API from lauren_core
pub use lauren_core::api::{
    BytecodeCompiler, CompileOptions, Diagnostic, Error, Severity, compile,
};

// Re-export the instruction model and parse tree
pub use lauren_core::compiler::CompileError;
pub use lauren_core::parser::{self, ParseError, Span, SyntaxKind, SyntaxNode};
pub use lauren_core::vm::{self, Code, Instruction, Lambda, Op, Value};
