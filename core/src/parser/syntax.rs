// Parse-tree shapes handed from the parser to the compiler.

use core::fmt;
use core::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
    pub fn start(&self) -> usize {
        self.0.start
    }
    pub fn end(&self) -> usize {
        self.0.end
    }
    pub fn combine(a: &Span, b: &Span) -> Span {
        Span::new(a.0.start, b.0.end)
    }
    pub fn str_of<'a>(&self, source: &'a str) -> &'a str {
        &source[self.0.start..self.0.end]
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(s: pest::Span<'_>) -> Self {
        Self(s.start()..s.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.0.start, self.0.end)
    }
}

/// Syntactic category of a parse-tree node.
///
/// This is a closed set: the compiler matches on it exhaustively, so a new
/// category cannot be added to the grammar without a translation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    ExpressionList,
    /// Newline run between two list elements.
    Separator,
    Literal,
    Number,
    Boolean,
    String,
    Identifier,
    Assignment,
    Invocation,
    ArgumentList,
    Lambda,
    ParameterList,
    /// `?name`; the marker is part of the node text.
    Parameter,
    Block,
    Forever,
    Conditional,
    If,
    Elseif,
    Else,
}

impl SyntaxKind {
    /// Whether nodes of this kind hold a separator-delimited list.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExpressionList | SyntaxKind::ArgumentList | SyntaxKind::ParameterList
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyntaxKind::Program => "program",
            SyntaxKind::ExpressionList => "expression list",
            SyntaxKind::Separator => "separator",
            SyntaxKind::Literal => "literal",
            SyntaxKind::Number => "number",
            SyntaxKind::Boolean => "boolean",
            SyntaxKind::String => "string",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::Assignment => "assignment",
            SyntaxKind::Invocation => "invocation",
            SyntaxKind::ArgumentList => "argument list",
            SyntaxKind::Lambda => "lambda",
            SyntaxKind::ParameterList => "parameter list",
            SyntaxKind::Parameter => "parameter",
            SyntaxKind::Block => "block",
            SyntaxKind::Forever => "forever loop",
            SyntaxKind::Conditional => "conditional",
            SyntaxKind::If => "if clause",
            SyntaxKind::Elseif => "elseif clause",
            SyntaxKind::Else => "else clause",
        };
        f.write_str(name)
    }
}

/// A node of the parse tree: category, covered source, and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode<'src> {
    pub kind: SyntaxKind,
    pub span: Span,
    /// Exact source text matched by this node.
    pub text: &'src str,
    pub children: Vec<SyntaxNode<'src>>,
}

impl<'src> SyntaxNode<'src> {
    pub fn new(kind: SyntaxKind, span: Span, text: &'src str) -> Self {
        Self {
            kind,
            span,
            text,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode<'src>>) -> Self {
        self.children = children;
        self
    }

    /// Indented, one-node-per-line dump of the tree.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        use core::fmt::Write;

        let _ = write!(out, "{:indent$}{:?} {}", "", self.kind, self.span, indent = depth * 2);
        if self.children.is_empty() && !self.text.is_empty() {
            let _ = write!(out, " {:?}", self.text);
        }
        out.push('\n');
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_combine_and_slice() {
        let source = "a1: 2";
        let a = Span::new(0, 2);
        let b = Span::new(4, 5);
        assert_eq!(Span::combine(&a, &b), Span::new(0, 5));
        assert_eq!(a.str_of(source), "a1");
        assert_eq!(b.to_string(), "4..5");
    }

    #[test]
    fn test_only_list_kinds_are_lists() {
        assert!(SyntaxKind::ExpressionList.is_list());
        assert!(SyntaxKind::ArgumentList.is_list());
        assert!(SyntaxKind::ParameterList.is_list());
        assert!(!SyntaxKind::Lambda.is_list());
        assert!(!SyntaxKind::Separator.is_list());
    }

    #[test]
    fn test_render_leaf_text() {
        let node = SyntaxNode::new(SyntaxKind::Program, Span::new(0, 1), "1").with_children(vec![
            SyntaxNode::new(SyntaxKind::Number, Span::new(0, 1), "1"),
        ]);
        assert_eq!(node.render(), "Program 0..1\n  Number 0..1 \"1\"\n");
    }
}
