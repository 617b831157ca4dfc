#[macro_use]
mod cases;

use cases::*;
use lauren::Op;

test_case! {
    name: empty_program,
    input: { "" },
    bytecode: { vec![undefined(), Op::Return] },
}

test_case! {
    name: blank_lines_only,
    input: { "\n\n" },
    bytecode: { vec![undefined(), Op::Return] },
}

test_case! {
    name: returns_one,
    input: { "1" },
    bytecode: { vec![num(1.0), Op::Return] },
}

test_case! {
    name: returns_the_fourth_of_four,
    input: { "1\n2\n3\n4" },
    bytecode: {
        vec![
            num(1.0),
            num(2.0),
            num(3.0),
            num(4.0),
            Op::Pop,
            Op::Pop,
            Op::Pop,
            Op::Return,
        ]
    },
}

test_case! {
    name: surrounding_newlines,
    input: { "\n1\n\n2\n" },
    bytecode: { vec![num(1.0), num(2.0), Op::Pop, Op::Return] },
}

test_case! {
    name: literal_kinds,
    input: { "-11.22\ntrue\nfalse\n\"hello - my name is mary\"\nperson" },
    bytecode: {
        vec![
            num(-11.22),
            boolean(true),
            boolean(false),
            string("hello - my name is mary"),
            get_env("person"),
            Op::Pop,
            Op::Pop,
            Op::Pop,
            Op::Pop,
            Op::Return,
        ]
    },
}
