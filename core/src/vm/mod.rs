//! Instruction set and compiled-code container consumed by an executor.

mod code;
mod instruction_set;
mod value;

pub use code::Code;
pub use instruction_set::{Instruction, Lambda, Op};
pub use value::Value;
