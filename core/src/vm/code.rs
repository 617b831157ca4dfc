use core::fmt;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::vm::{Instruction, Op};

/// A compiled program: the flat instruction stream handed to an executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub instructions: Vec<Instruction>,
}

impl Code {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Ops only, in order. Handy for asserting on top-level shape.
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.instructions.iter().map(|instr| &instr.op)
    }

    /// Copy without spans or annotation flags, nested bodies included.
    pub fn stripped(&self) -> Code {
        Code::new(self.instructions.iter().map(Instruction::stripped).collect())
    }

    /// Compact binary encoding for shipping code to an executor.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Code, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

/// Absolute index a jump at `addr` lands on, if it stays non-negative.
fn jump_target(addr: usize, offset: i32) -> Option<usize> {
    let target = addr as i64 + 1 + offset as i64;
    usize::try_from(target).ok()
}

/// Write one instruction sequence, labelling jump targets `L0, L1, ...`.
///
/// Labels are local to the sequence: offsets never cross a lambda boundary.
fn write_listing(f: &mut fmt::Formatter<'_>, instructions: &[Instruction], depth: usize) -> fmt::Result {
    // First pass: collect all jump targets to determine which addresses need labels
    let jump_targets: HashSet<usize> = instructions
        .iter()
        .enumerate()
        .filter_map(|(addr, instr)| jump_target(addr, instr.op.jump_offset()?))
        .collect();

    // Assign label numbers to targets (sorted for deterministic output)
    let mut sorted_targets: Vec<_> = jump_targets.into_iter().collect();
    sorted_targets.sort();
    let label_map: HashMap<usize, usize> = sorted_targets
        .into_iter()
        .enumerate()
        .map(|(i, addr)| (addr, i))
        .collect();

    let indent = depth * 4;
    for (addr, instr) in instructions.iter().enumerate() {
        let label_prefix = label_map
            .get(&addr)
            .map(|label| format!("L{}:", label))
            .unwrap_or_default();
        let marker = if instr.annotate { '*' } else { ' ' };

        write!(
            f,
            "{:indent$}{:4} {:>4} {} {}",
            "",
            addr,
            label_prefix,
            marker,
            instr.op,
            indent = indent
        )?;

        if let Some(offset) = instr.op.jump_offset() {
            let target = jump_target(addr, offset)
                .and_then(|target| label_map.get(&target))
                .map(|label| format!("L{}", label))
                .unwrap_or_else(|| format!("@{}", addr as i64 + 1 + offset as i64));
            write!(f, " (to {})", target)?;
        }
        writeln!(f, "    ; {}", instr.span)?;

        if let Op::PushLambda(lambda) = &instr.op {
            write_listing(f, &lambda.body, depth + 1)?;
        }
    }

    // Labels one past the end (e.g. a jump over the final instruction).
    if let Some(label) = label_map.get(&instructions.len()) {
        writeln!(f, "{:indent$}{:4} {:>4}", "", instructions.len(), format!("L{}:", label), indent = indent)?;
    }

    Ok(())
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, &self.instructions, 0)
    }
}
