pub mod error;
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::LaurenParser;
pub use parser::Rule;
pub use parser::{DEFAULT_MAX_DEPTH, is_match, parse, parse_with_max_depth};

pub use error::{ParseError, ParseErrorKind};
pub use syntax::{Span, SyntaxKind, SyntaxNode};

#[cfg(test)]
mod parse_test;
