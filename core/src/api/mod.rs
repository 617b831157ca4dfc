//! Public API for compiling Lauren programs.
//!
//! # Example
//!
//! ```
//! use lauren_core::api::{BytecodeCompiler, CompileOptions};
//!
//! let compiler = BytecodeCompiler::new(CompileOptions::default());
//! let code = compiler.compile("a1: 2").unwrap();
//! assert_eq!(code.instructions.len(), 3);
//! ```

pub mod error;
pub mod options;

pub use crate::compiler::{BytecodeCompiler, compile};
pub use error::{Diagnostic, Error, Severity};
pub use options::CompileOptions;
