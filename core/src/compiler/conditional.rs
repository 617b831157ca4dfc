//! Relative jump offsets for conditionals and loops.
//!
//! Offsets count instructions, measured from the instruction after the jump.
//! Every distance is taken from sequences that are already emitted, so no
//! instruction is ever patched after it has been appended.

use super::CompileError;
use crate::parser::Span;
use crate::vm::{Instruction, Op};

/// One `if`/`elseif`/`else` arm, compiled but not yet linked.
pub(super) struct Clause {
    /// Instructions leaving the condition on the stack.
    pub guard: Vec<Instruction>,
    /// The lowered block run when the condition holds.
    pub block: Vec<Instruction>,
    pub span: Span,
}

/// Offset for skipping `distance` instructions forward.
fn forward(distance: usize) -> Result<i32, CompileError> {
    i32::try_from(distance).map_err(|_| CompileError::JumpTooFar { distance })
}

/// `<block> pop jump back-to-block-start`.
///
/// The back jump spans the block, the `pop`, and the jump itself, so it
/// lands on the block's `arg_start`. For a standard block that is -5, not
/// -4: -4 lands on `push_lambda` and leaves every later iteration without
/// its argument frame.
pub(super) fn forever_loop(block: Vec<Instruction>, span: &Span) -> Result<Vec<Instruction>, CompileError> {
    let back = forward(block.len() + 2)?;
    let mut bc = block;
    bc.push(Instruction::new(Op::Pop, span.clone(), false));
    bc.push(Instruction::new(Op::Jump(-back), span.clone(), false));
    Ok(bc)
}

/// Link clauses into a chain where exactly one body runs.
///
/// Each clause becomes `guard if_not_true_jump <block+1> block jump <rest>`.
/// A false guard skips its block and its exit jump, landing on the next
/// clause; a finished block jumps past everything still to come. `fallback`
/// closes the chain and produces the value when no guard holds.
pub(super) fn link_clauses(
    clauses: Vec<Clause>,
    fallback: Vec<Instruction>,
    fallback_span: &Span,
) -> Result<Vec<Instruction>, CompileError> {
    let mut chunks = Vec::with_capacity(clauses.len() + 1);
    for clause in clauses {
        let skip = forward(clause.block.len() + 1)?;
        let mut chunk = clause.guard;
        chunk.push(Instruction::new(Op::IfNotTrueJump(skip), clause.span.clone(), false));
        chunk.extend(clause.block);
        chunks.push((chunk, clause.span));
    }
    chunks.push((fallback, fallback_span.clone()));

    // Fold from the last chunk back so each exit jump knows what follows it.
    let mut bc: Vec<Instruction> = Vec::new();
    for (mut chunk, span) in chunks.into_iter().rev() {
        chunk.push(Instruction::new(Op::Jump(forward(bc.len())?), span, false));
        chunk.extend(bc);
        bc = chunk;
    }
    Ok(bc)
}
