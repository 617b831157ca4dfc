//! Lauren Instructions
//!
//! This module defines the instruction set the compiler emits for Lauren's
//! stack-based executor.
//!
//! # Design Principles
//!
//! - **Stack-based**: Operations consume operands from the stack and push results
//! - **One operand shape per opcode**: [`Op`] is a tagged variant, so an executor
//!   matching on it is checked for exhaustiveness
//! - **Relative control flow**: Jumps carry a signed instruction count, relative
//!   to the instruction after the jump. `0` falls through, negative goes back
//! - **Inline lambdas**: `PushLambda` embeds the compiled body, so bytecode nests
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::parser::Span;
use crate::vm::Value;

/// Operation performed by an [`Instruction`], with its operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Push a literal value
    /// Stack: [...] -> [..., value]
    Push(Value),

    /// Discard top value
    /// Stack: [..., a] -> [...]
    Pop,

    /// Return top value from the current program or lambda body
    /// Stack: [..., a] -> (a returned)
    Return,

    /// Bind a name in the environment to the top value, leaving it in place
    /// Stack: [..., a] -> [..., a]
    SetEnv(String),

    /// Look a name up in the environment
    /// Stack: [...] -> [..., value]
    GetEnv(String),

    /// Mark the start of an argument frame on the argument stack.
    ///
    /// Lets the executor find where the arguments of the next `Invoke` begin.
    ArgStart,

    /// Call the invocable on top with the `n` arguments below it
    /// Stack: [..., arg1, ..., argN, f] -> [..., result]
    Invoke(usize),

    /// Push a closure built from an inline lambda
    /// Stack: [...] -> [..., lambda]
    PushLambda(Lambda),

    /// Unconditional relative jump
    Jump(i32),

    /// Pop the condition; jump when it is not `true`
    /// Stack: [..., cond] -> [...]
    IfNotTrueJump(i32),
}

impl Op {
    /// Relative offset carried by a jump, if this is one.
    pub fn jump_offset(&self) -> Option<i32> {
        match self {
            Op::Jump(offset) | Op::IfNotTrueJump(offset) => Some(*offset),
            _ => None,
        }
    }

    /// Lowercase opcode name as it appears in listings.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Push(_) => "push",
            Op::Pop => "pop",
            Op::Return => "return",
            Op::SetEnv(_) => "set_env",
            Op::GetEnv(_) => "get_env",
            Op::ArgStart => "arg_start",
            Op::Invoke(_) => "invoke",
            Op::PushLambda(_) => "push_lambda",
            Op::Jump(_) => "jump",
            Op::IfNotTrueJump(_) => "if_not_true_jump",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Push(value) => write!(f, "push {}", value),
            Op::SetEnv(name) | Op::GetEnv(name) => write!(f, "{} {}", self.name(), name),
            Op::Invoke(argc) => write!(f, "invoke {}", argc),
            Op::PushLambda(lambda) => write!(f, "push_lambda [{}]", lambda.parameters.join(" ")),
            Op::Jump(offset) | Op::IfNotTrueJump(offset) => {
                write!(f, "{} {}", self.name(), offset)
            }
            Op::Pop | Op::Return | Op::ArgStart => f.write_str(self.name()),
        }
    }
}

/// One step of the output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Op,
    /// Span of the parse-tree node this instruction was emitted for.
    pub span: Span,
    /// True for user-visible steps, false for mechanically inserted ones.
    pub annotate: bool,
}

impl Instruction {
    pub fn new(op: Op, span: Span, annotate: bool) -> Self {
        Self { op, span, annotate }
    }

    /// Copy with the auxiliary metadata cleared, recursively.
    ///
    /// Two instruction streams that only differ in spans or annotation
    /// compare equal once stripped.
    pub fn stripped(&self) -> Instruction {
        let op = match &self.op {
            Op::PushLambda(lambda) => Op::PushLambda(Lambda {
                parameters: lambda.parameters.clone(),
                body: lambda.body.iter().map(Instruction::stripped).collect(),
            }),
            op => op.clone(),
        };
        Instruction::new(op, Span::default(), false)
    }
}

/// Operand of `PushLambda`: parameter names and the compiled body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub parameters: Vec<String>,
    pub body: Vec<Instruction>,
}
