use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};

/// Parser error with the offending source attached
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "P001",
            ParseErrorKind::MaxDepthExceeded { .. } => "P004",
            ParseErrorKind::Other { .. } => "P999",
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                (format!("Expected {}, found {}", expected, found), vec![])
            }
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                vec!["Reduce nesting or split the program into smaller lambdas".to_string()],
            ),
            ParseErrorKind::Other { message } => (message.clone(), vec![]),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            help,
            code: Some(self.code().to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        for help_msg in &diagnostic.help {
            write!(f, "\nhelp: {}", help_msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: format_found(&negatives, source, span.start()),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Group the rules pest expected into a few user-facing concepts.
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::number | Rule::boolean | Rule::string | Rule::literal => "literal",
            Rule::identifier => "identifier",
            Rule::parameter => "parameter",
            Rule::block | Rule::lambda => "block",
            Rule::argument_list => "argument list",
            Rule::separator => "newline",
            Rule::kw_elseif | Rule::kw_else => "elseif or else",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Describe what was found at the failure position.
fn format_found(negatives: &[Rule], source: &str, pos: usize) -> String {
    if let Some(rule) = negatives.first() {
        return match rule {
            Rule::keyword => "keyword".to_string(),
            Rule::identifier => "identifier".to_string(),
            Rule::number => "number".to_string(),
            other => format!("{:?}", other),
        };
    }

    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        None => "end of input".to_string(),
        Some('\n') => "newline".to_string(),
        Some(c) => format!("'{}'", c),
    }
}
