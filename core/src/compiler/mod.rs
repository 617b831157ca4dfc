//! Bytecode compiler for Lauren programs.
//!
//! This module walks the parse tree produced by [`crate::parser`] and emits a
//! flat instruction stream for a stack machine.
//!
//! ## Design
//!
//! - One translation rule per syntactic category, matched exhaustively
//! - List nodes go through [`list`] first so counts are known before emission
//! - Jump offsets are computed from already-emitted sequence lengths
//!   ([`conditional`]); nothing is patched afterwards

mod bytecode;
mod conditional;
mod error;
mod list;


pub use bytecode::{BytecodeCompiler, compile};
pub use error::CompileError;
