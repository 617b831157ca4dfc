use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::error::{ParseError, ParseErrorKind, convert_pest_error};
use super::syntax::{Span, SyntaxKind, SyntaxNode};

/// Nesting depth allowed by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Parser)]
#[grammar = "parser/lauren.pest"]
pub struct LaurenParser;

/// Parse a whole program into a [`SyntaxNode`] tree rooted at `Program`.
pub fn parse(source: &str) -> Result<SyntaxNode<'_>, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<SyntaxNode<'_>, ParseError> {
    let mut pairs =
        LaurenParser::parse(Rule::program, source).map_err(|e| convert_pest_error(e, source))?;
    let pair = pairs.next().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::Other {
                message: "missing program".to_string(),
            },
            source.to_string(),
            Span::new(0, source.len()),
        )
    })?;

    let lowering = Lowering { source, max_depth };
    let mut nodes = lowering.lower(pair, 0)?;
    match nodes.pop() {
        Some(node) if nodes.is_empty() => Ok(node),
        _ => Err(lowering.error(
            ParseErrorKind::Other {
                message: "program did not produce a single tree".to_string(),
            },
            Span::new(0, source.len()),
        )),
    }
}

/// Whether `source` matches the grammar at all.
pub fn is_match(source: &str) -> bool {
    LaurenParser::parse(Rule::program, source).is_ok()
}

/// Category a grammar rule lowers to, if it becomes a node at all.
///
/// Keyword tokens and end-of-input carry no information beyond their parent.
fn syntax_kind(rule: Rule) -> Option<SyntaxKind> {
    let kind = match rule {
        Rule::program => SyntaxKind::Program,
        Rule::expression_list => SyntaxKind::ExpressionList,
        Rule::separator => SyntaxKind::Separator,
        Rule::literal => SyntaxKind::Literal,
        Rule::number => SyntaxKind::Number,
        Rule::boolean => SyntaxKind::Boolean,
        Rule::string => SyntaxKind::String,
        Rule::identifier => SyntaxKind::Identifier,
        Rule::assignment => SyntaxKind::Assignment,
        Rule::invocation => SyntaxKind::Invocation,
        Rule::argument_list => SyntaxKind::ArgumentList,
        Rule::lambda => SyntaxKind::Lambda,
        Rule::parameter_list => SyntaxKind::ParameterList,
        Rule::parameter => SyntaxKind::Parameter,
        Rule::block => SyntaxKind::Block,
        Rule::forever => SyntaxKind::Forever,
        Rule::conditional => SyntaxKind::Conditional,
        Rule::if_clause => SyntaxKind::If,
        Rule::elseif_clause => SyntaxKind::Elseif,
        Rule::else_clause => SyntaxKind::Else,
        _ => return None,
    };
    Some(kind)
}

struct Lowering<'src> {
    source: &'src str,
    max_depth: usize,
}

impl<'src> Lowering<'src> {
    /// Lower a pest pair. Pairs without a category are dropped; the result
    /// is empty for them and holds exactly one node otherwise.
    fn lower(&self, pair: Pair<'src, Rule>, depth: usize) -> Result<Vec<SyntaxNode<'src>>, ParseError> {
        let Some(kind) = syntax_kind(pair.as_rule()) else {
            return Ok(Vec::new());
        };
        if depth > self.max_depth {
            return Err(self.error(
                ParseErrorKind::MaxDepthExceeded {
                    depth,
                    max_depth: self.max_depth,
                },
                pair.as_span().into(),
            ));
        }

        let span: Span = pair.as_span().into();
        let text = pair.as_str();
        // An invocation pair also wraps bare callees; it adds no nesting.
        let child_depth = match kind {
            SyntaxKind::Invocation => depth,
            _ => depth + 1,
        };
        let mut children = Vec::new();
        for inner in pair.into_inner() {
            children.extend(self.lower(inner, child_depth)?);
        }

        let node = match kind {
            SyntaxKind::Invocation => self.nest_calls(children, &span)?,
            _ => SyntaxNode::new(kind, span, text).with_children(children),
        };
        Ok(vec![node])
    }

    /// `f(a)(b)` arrives as `[f, (a), (b)]`; nest it as `((f (a)) (b))`.
    /// A bare `[f]` is returned as `f`.
    fn nest_calls(
        &self,
        children: Vec<SyntaxNode<'src>>,
        span: &Span,
    ) -> Result<SyntaxNode<'src>, ParseError> {
        let mut children = children.into_iter();
        let Some(mut callee) = children.next() else {
            return Err(self.error(
                ParseErrorKind::Other {
                    message: "invocation without a callee".to_string(),
                },
                span.clone(),
            ));
        };

        for arguments in children {
            let span = Span::combine(&callee.span, &arguments.span);
            let text = span.str_of(self.source);
            callee = SyntaxNode::new(SyntaxKind::Invocation, span, text)
                .with_children(vec![callee, arguments]);
        }
        Ok(callee)
    }

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, self.source.to_string(), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_empty_program() {
        let tree = parse("").unwrap();
        assert_eq!(tree.kind, SyntaxKind::Program);
        assert_eq!(kinds(&tree), vec![SyntaxKind::ExpressionList]);
        assert!(tree.children[0].children.is_empty());
    }

    #[test]
    fn test_expression_list_keeps_separators() {
        let tree = parse("1\n2").unwrap();
        let list = &tree.children[0];
        assert_eq!(
            kinds(list),
            vec![SyntaxKind::Literal, SyntaxKind::Separator, SyntaxKind::Literal]
        );
        assert_eq!(list.children[2].span, Span::new(2, 3));
    }

    #[test]
    fn test_assignment_shape() {
        let tree = parse("a1: 2").unwrap();
        let assignment = &tree.children[0].children[0];
        assert_eq!(assignment.kind, SyntaxKind::Assignment);
        assert_eq!(kinds(assignment), vec![SyntaxKind::Identifier, SyntaxKind::Literal]);
        assert_eq!(assignment.children[0].text, "a1");
    }

    #[test]
    fn test_chained_invocations_nest_left_to_right() {
        let tree = parse("f(1)(2 3)").unwrap();
        let outer = &tree.children[0].children[0];
        assert_eq!(outer.kind, SyntaxKind::Invocation);
        assert_eq!(outer.text, "f(1)(2 3)");
        let inner = &outer.children[0];
        assert_eq!(inner.kind, SyntaxKind::Invocation);
        assert_eq!(inner.text, "f(1)");
        assert_eq!(kinds(inner), vec![SyntaxKind::Identifier, SyntaxKind::ArgumentList]);
        assert_eq!(outer.children[1].text, "(2 3)");
    }

    #[test]
    fn test_bare_callee_is_not_an_invocation() {
        let tree = parse("{ ?a a }\nb").unwrap();
        let list = &tree.children[0];
        assert_eq!(
            kinds(list),
            vec![SyntaxKind::Lambda, SyntaxKind::Separator, SyntaxKind::Identifier]
        );
        let body = &list.children[0].children[1];
        assert_eq!(kinds(body), vec![SyntaxKind::Identifier]);
    }

    #[test]
    fn test_keywords_do_not_become_nodes() {
        let tree = parse("if true { 1 } else { 2 }").unwrap();
        let conditional = &tree.children[0].children[0];
        assert_eq!(kinds(conditional), vec![SyntaxKind::If, SyntaxKind::Else]);
        assert_eq!(
            kinds(&conditional.children[0]),
            vec![SyntaxKind::Literal, SyntaxKind::Block]
        );
        assert_eq!(kinds(&conditional.children[1]), vec![SyntaxKind::Block]);
    }

    #[test]
    fn test_parameters_keep_marker_in_text() {
        let tree = parse("{ ?a1 ?b2 }").unwrap();
        let lambda = &tree.children[0].children[0];
        let params = &lambda.children[0];
        assert_eq!(params.kind, SyntaxKind::ParameterList);
        let texts: Vec<_> = params.children.iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["?a1", "?b2"]);
    }

    #[test]
    fn test_max_depth_exceeded() {
        let err = parse_with_max_depth("{ { { 1 } } }", 4).unwrap_err();
        match err.kind {
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => assert_eq!(max_depth, 4),
            other => panic!("Expected MaxDepthExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_is_match() {
        assert!(is_match("a1(2 b3)"));
        assert!(!is_match("1person"));
    }
}
