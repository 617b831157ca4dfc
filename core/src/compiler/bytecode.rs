//! Bytecode compiler implementation.

use tracing::{debug, trace};

use super::conditional::{self, Clause};
use super::list::list_elements;
use super::CompileError;
use crate::api::{CompileOptions, Error};
use crate::parser::{self, SyntaxKind, SyntaxNode};
use crate::vm::{Code, Instruction, Lambda, Op, Value};

/// Spelling of the true boolean literal.
const TRUE_LITERAL: &str = "true";

/// Prefix marking a lambda parameter in source text.
const PARAMETER_MARKER: char = '?';

/// Bytecode compiler that turns Lauren parse trees into instruction streams.
///
/// The compiler holds no state between calls: each node's instructions are
/// built from its children's, so compiling the same source twice gives
/// identical code.
#[derive(Debug, Clone, Default)]
pub struct BytecodeCompiler {
    options: CompileOptions,
}

impl BytecodeCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Parse and compile `source`.
    ///
    /// A source that does not match the grammar fails with
    /// [`Error::Syntax`] before any instruction is emitted.
    pub fn compile(&self, source: &str) -> Result<Code, Error> {
        let tree = parser::parse_with_max_depth(source, self.options.max_depth)?;
        Ok(self.compile_tree(&tree)?)
    }

    /// Compile an already parsed program (or any expression node).
    pub fn compile_tree(&self, tree: &SyntaxNode) -> Result<Code, CompileError> {
        let code = Code::new(self.emit(tree)?);
        debug!(
            instructions = code.len(),
            span = %tree.span,
            "compiled {}", tree.kind
        );
        Ok(code)
    }

    fn emit(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        trace!(kind = ?node.kind, span = %node.span, "emit");
        match node.kind {
            SyntaxKind::Program => self.emit(only_child(node)?),
            SyntaxKind::ExpressionList => self.emit_expression_list(node),
            SyntaxKind::Literal => {
                let value = literal_value(only_child(node)?)?;
                Ok(vec![annotated(Op::Push(value), node)])
            }
            SyntaxKind::Identifier => Ok(vec![annotated(Op::GetEnv(node.text.to_string()), node)]),
            SyntaxKind::Assignment => self.emit_assignment(node),
            SyntaxKind::Invocation => self.emit_invocation(node),
            SyntaxKind::Lambda => self.emit_lambda(node),
            SyntaxKind::Block => self.emit_block(node),
            SyntaxKind::Forever => {
                let block = self.emit(child_of_kind(node, 0, SyntaxKind::Block)?)?;
                conditional::forever_loop(block, &node.span)
            }
            SyntaxKind::Conditional => self.emit_conditional(node),
            SyntaxKind::Separator
            | SyntaxKind::Number
            | SyntaxKind::Boolean
            | SyntaxKind::String
            | SyntaxKind::ArgumentList
            | SyntaxKind::ParameterList
            | SyntaxKind::Parameter
            | SyntaxKind::If
            | SyntaxKind::Elseif
            | SyntaxKind::Else => Err(CompileError::UnexpectedNode {
                kind: node.kind,
                span: node.span.clone(),
            }),
        }
    }

    /// `E1 ... Ek`, a `pop` for every value but the last, then `return`.
    fn emit_expression_list(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let expressions = list_elements(node)?;
        if expressions.is_empty() {
            return Ok(vec![
                mechanical(Op::Push(Value::Undefined), node),
                mechanical(Op::Return, node),
            ]);
        }

        let mut bc = Vec::new();
        for expression in &expressions {
            bc.extend(self.emit(expression)?);
        }
        bc.extend((1..expressions.len()).map(|_| mechanical(Op::Pop, node)));
        bc.push(mechanical(Op::Return, node));
        Ok(bc)
    }

    /// `<value> set_env name`
    fn emit_assignment(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let [name, value] = node.children.as_slice() else {
            return Err(malformed(node, "expected a name and a value"));
        };
        if name.kind != SyntaxKind::Identifier {
            return Err(malformed(node, "assignment target is not an identifier"));
        }

        let mut bc = self.emit(value)?;
        bc.push(annotated(Op::SetEnv(name.text.to_string()), node));
        Ok(bc)
    }

    /// `arg_start A1 ... An <invocable> invoke n`
    ///
    /// Arguments go left to right, then the invocable; `invoke` pops the
    /// invocable and then its `n` arguments.
    fn emit_invocation(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let [invocable, arguments] = node.children.as_slice() else {
            return Err(malformed(node, "expected an invocable and an argument list"));
        };
        let arguments = list_elements(arguments)?;

        let mut bc = vec![mechanical(Op::ArgStart, node)];
        for argument in &arguments {
            bc.extend(self.emit(argument)?);
        }
        bc.extend(self.emit(invocable)?);
        // TODO: emit a tail-call form when the invocation is the last
        // expression of a lambda body.
        bc.push(annotated(Op::Invoke(arguments.len()), node));
        Ok(bc)
    }

    /// `push_lambda {parameters, body}`; the body compiles like a program.
    fn emit_lambda(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let parameters = list_elements(child_of_kind(node, 0, SyntaxKind::ParameterList)?)?
            .into_iter()
            .map(parameter_name)
            .collect::<Result<Vec<_>, _>>()?;
        let body = self.emit(child_of_kind(node, 1, SyntaxKind::ExpressionList)?)?;

        Ok(vec![annotated(Op::PushLambda(Lambda { parameters, body }), node)])
    }

    /// `arg_start <lambda> invoke 0`: a zero-argument call of a bare lambda.
    ///
    /// The closing `invoke` is not user-authored, so it is not annotated.
    fn emit_block(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let lambda = child_of_kind(node, 0, SyntaxKind::Lambda)?;

        let mut bc = vec![mechanical(Op::ArgStart, node)];
        bc.extend(self.emit(lambda)?);
        bc.push(mechanical(Op::Invoke(0), node));
        Ok(bc)
    }

    fn emit_conditional(&self, node: &SyntaxNode) -> Result<Vec<Instruction>, CompileError> {
        let clauses = node
            .children
            .iter()
            .map(|clause| self.clause(clause))
            .collect::<Result<Vec<_>, _>>()?;
        if clauses.is_empty() {
            return Err(malformed(node, "conditional without clauses"));
        }

        let fallback = vec![mechanical(Op::Push(Value::Undefined), node)];
        conditional::link_clauses(clauses, fallback, &node.span)
    }

    /// Guard and block of one arm. `else` is guarded by a literal `true`
    /// so that it links like any other arm.
    fn clause(&self, node: &SyntaxNode) -> Result<Clause, CompileError> {
        let (guard, block) = match (node.kind, node.children.as_slice()) {
            (SyntaxKind::If | SyntaxKind::Elseif, [condition, block]) => (self.emit(condition)?, block),
            (SyntaxKind::Else, [block]) => (
                vec![annotated(Op::Push(Value::Boolean(true)), node)],
                block,
            ),
            (SyntaxKind::If | SyntaxKind::Elseif | SyntaxKind::Else, _) => {
                return Err(malformed(node, "unexpected clause shape"));
            }
            (kind, _) => {
                return Err(CompileError::UnexpectedNode {
                    kind,
                    span: node.span.clone(),
                });
            }
        };
        if block.kind != SyntaxKind::Block {
            return Err(malformed(node, "clause body is not a block"));
        }

        Ok(Clause {
            guard,
            block: self.emit(block)?,
            span: node.span.clone(),
        })
    }
}

/// Convenience function to compile `source` with default options.
pub fn compile(source: &str) -> Result<Code, Error> {
    BytecodeCompiler::default().compile(source)
}

// === Instruction Construction ===

/// A user-visible step.
fn annotated(op: Op, node: &SyntaxNode) -> Instruction {
    Instruction::new(op, node.span.clone(), true)
}

/// A mechanically inserted step.
fn mechanical(op: Op, node: &SyntaxNode) -> Instruction {
    Instruction::new(op, node.span.clone(), false)
}

// === Tree Access ===

fn malformed(node: &SyntaxNode, reason: &str) -> CompileError {
    CompileError::MalformedNode {
        kind: node.kind,
        span: node.span.clone(),
        reason: reason.to_string(),
    }
}

fn only_child<'t, 'src>(node: &'t SyntaxNode<'src>) -> Result<&'t SyntaxNode<'src>, CompileError> {
    match node.children.as_slice() {
        [child] => Ok(child),
        _ => Err(malformed(node, "expected exactly one child")),
    }
}

fn child_of_kind<'t, 'src>(
    node: &'t SyntaxNode<'src>,
    index: usize,
    kind: SyntaxKind,
) -> Result<&'t SyntaxNode<'src>, CompileError> {
    match node.children.get(index) {
        Some(child) if child.kind == kind => Ok(child),
        _ => Err(CompileError::MalformedNode {
            kind: node.kind,
            span: node.span.clone(),
            reason: format!("child {} is not a {}", index, kind),
        }),
    }
}

fn literal_value(node: &SyntaxNode) -> Result<Value, CompileError> {
    match node.kind {
        SyntaxKind::Number => node
            .text
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| malformed(node, "invalid number literal")),
        SyntaxKind::Boolean => Ok(Value::Boolean(node.text == TRUE_LITERAL)),
        SyntaxKind::String => node
            .text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| malformed(node, "string literal is not quoted")),
        kind => Err(CompileError::UnexpectedNode {
            kind,
            span: node.span.clone(),
        }),
    }
}

fn parameter_name(node: &SyntaxNode) -> Result<String, CompileError> {
    if node.kind != SyntaxKind::Parameter {
        return Err(CompileError::UnexpectedNode {
            kind: node.kind,
            span: node.span.clone(),
        });
    }
    node.text
        .strip_prefix(PARAMETER_MARKER)
        .map(str::to_string)
        .ok_or_else(|| malformed(node, "parameter is missing its marker"))
}
