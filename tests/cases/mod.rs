#![allow(dead_code)]

use lauren::{Instruction, Lambda, Op, Span, Value};
use once_cell::sync::Lazy;

/// Compile `input` and compare its instructions, spans and annotation
/// flags stripped, against `bytecode`.
#[allow(unused_macros)]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:block,
        bytecode: $bytecode:block $(,)?
    ) => {
        #[test]
        fn $name() {
            let input = $input;
            let code = match lauren::compile(input) {
                Ok(code) => code,
                Err(e) => panic!(
                    "Failed to compile {:?}:\n{}",
                    input,
                    lauren::render_error_to_string_no_color(&e)
                ),
            };
            let ops: Vec<lauren::Op> = code.stripped().ops().cloned().collect();
            let expected: Vec<lauren::Op> = $bytecode;
            pretty_assertions::assert_eq!(ops, expected, "bytecode for {:?}", input);
        }
    };
}

pub fn num(n: f64) -> Op {
    Op::Push(Value::Number(n))
}

pub fn boolean(b: bool) -> Op {
    Op::Push(Value::Boolean(b))
}

pub fn string(s: &str) -> Op {
    Op::Push(Value::String(s.to_string()))
}

pub fn undefined() -> Op {
    Op::Push(Value::Undefined)
}

pub fn get_env(name: &str) -> Op {
    Op::GetEnv(name.to_string())
}

pub fn set_env(name: &str) -> Op {
    Op::SetEnv(name.to_string())
}

pub fn lambda(parameters: &[&str], body: Vec<Op>) -> Op {
    Op::PushLambda(Lambda {
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
        body: body
            .into_iter()
            .map(|op| Instruction::new(op, Span::default(), false))
            .collect(),
    })
}

/// `arg_start push_lambda {[], [push n, return]} invoke 0`
pub fn block_returning(n: f64) -> Vec<Op> {
    vec![
        Op::ArgStart,
        lambda(&[], vec![num(n), Op::Return]),
        Op::Invoke(0),
    ]
}

/// One linked `if`/`elseif`/`else` arm whose block returns `n`.
pub fn clause(guard: bool, n: f64, exit: i32) -> Vec<Op> {
    let mut ops = vec![boolean(guard), Op::IfNotTrueJump(4)];
    ops.extend(block_returning(n));
    ops.push(Op::Jump(exit));
    ops
}

/// Fallback of every conditional followed by the program's `return`.
pub fn conditional_tail() -> Vec<Op> {
    vec![undefined(), Op::Jump(0), Op::Return]
}

pub struct TestCase {
    pub name: &'static str,
    pub input: &'static str,
    pub bytecode: Vec<Op>,
}

/// Small programs whose full bytecode is pinned down.
pub static TEST_CASES: Lazy<Vec<TestCase>> = Lazy::new(|| {
    vec![
        TestCase {
            name: "empty_program",
            input: "",
            bytecode: vec![undefined(), Op::Return],
        },
        TestCase {
            name: "single_number",
            input: "1",
            bytecode: vec![num(1.0), Op::Return],
        },
        TestCase {
            name: "assignment",
            input: "a1: 2",
            bytecode: vec![num(2.0), set_env("a1"), Op::Return],
        },
        TestCase {
            name: "invocation_without_arguments",
            input: "a1()",
            bytecode: vec![Op::ArgStart, get_env("a1"), Op::Invoke(0), Op::Return],
        },
        TestCase {
            name: "empty_lambda",
            input: "{}",
            bytecode: vec![lambda(&[], vec![undefined(), Op::Return]), Op::Return],
        },
    ]
});
