//! Lauren core: grammar, parse tree, and bytecode compiler.
//!
//! Source text goes through [`parser`] into a [`parser::SyntaxNode`] tree,
//! which [`compiler`] lowers to a flat [`vm::Code`] stream for a stack machine.

pub mod api;
pub mod compiler;
pub mod parser;
pub mod vm;
