//! Element extraction for separator-delimited list nodes.

use super::CompileError;
use crate::parser::{SyntaxKind, SyntaxNode};

/// The elements of a list node, in source order, without compiling them.
///
/// Separators may sit between elements but never lead, trail or repeat.
/// Callers use the count before emitting (`invoke n`, lambda parameters).
pub(super) fn list_elements<'t, 'src>(
    node: &'t SyntaxNode<'src>,
) -> Result<Vec<&'t SyntaxNode<'src>>, CompileError> {
    if !node.kind.is_list() {
        return Err(CompileError::NotAList {
            kind: node.kind,
            span: node.span.clone(),
        });
    }

    let Some((first, rest)) = node.children.split_first() else {
        return Ok(Vec::new());
    };
    if first.kind == SyntaxKind::Separator {
        return Err(misplaced_separator(node, first));
    }

    let mut elements = vec![first];
    let mut after_separator = false;
    for child in rest {
        match child.kind {
            SyntaxKind::Separator if after_separator => return Err(misplaced_separator(node, child)),
            SyntaxKind::Separator => after_separator = true,
            _ => {
                elements.push(child);
                after_separator = false;
            }
        }
    }
    if after_separator {
        return Err(misplaced_separator(node, node.children.last().unwrap_or(first)));
    }

    Ok(elements)
}

fn misplaced_separator(list: &SyntaxNode, separator: &SyntaxNode) -> CompileError {
    CompileError::MalformedNode {
        kind: list.kind,
        span: separator.span.clone(),
        reason: "separator not between two elements".to_string(),
    }
}
