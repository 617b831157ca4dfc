use super::parser::{LaurenParser, Rule};
use pest::Parser;
use pest::error::Error;

#[test]
fn test_valid_programs() -> Result<(), Error<Rule>> {
    let examples = [
        "",
        "\n\n",
        "1",
        "1\n2\n3\n4",
        "  1  \n  2  ",
        "a1: 2",
        "a1()",
        "a1(2 b3)",
        "{}",
        "{ ?a1 ?b2 }",
        "{ 1 \n 2 }",
        "{ {}() }",
        "forever {}",
        "if true { 1 }",
        "if true { 1 } else { 2 }",
        "if true { 1 } elseif false { 2 } else { 3 }",
        "if true { 1 } elseif false { 2 } elseif true { 3 } else { 4 }",
        "if x {\n  print(x)\n}\nelse {\n  print(\"none\")\n}",
        "counter: 0\nforever {\n  counter: add(counter 1)\n}",
        "\"hello - my name is mary\"",
    ];

    for program in examples {
        LaurenParser::parse(Rule::program, program)
            .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", program, e));
    }

    Ok(())
}

#[test]
fn test_invalid_programs() {
    let examples = [
        "11.",
        "1person",
        "1 2",
        "a1(",
        "a1(2 b3",
        "{",
        "}",
        "a1:",
        ": 2",
        "{ 1 ?a }",
        "forever",
        "forever { ?a a }",
        "if true",
        "if { 1 }",
        "else { 1 }",
        "if true { 1 } else",
        "if: 1",
        "true: 1",
    ];

    for program in examples {
        assert!(
            LaurenParser::parse(Rule::program, program).is_err(),
            "Expected '{}' to be rejected",
            program
        );
    }
}

#[test]
fn test_nested_lambdas_parse_in_linear_time() {
    use std::time::{Duration, Instant};

    let depth = 40;
    let curried = format!("{}1{}", "{ ?a ".repeat(depth), " }".repeat(depth));
    let as_arguments = format!("{}1{}", "f({ ".repeat(depth), " })".repeat(depth));

    for program in [curried, as_arguments] {
        let started = Instant::now();
        let code = crate::api::compile(&program)
            .unwrap_or_else(|e| panic!("Failed to compile nested lambdas: {}", e));
        assert!(!code.is_empty());
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "{} nested lambdas took {:?}",
            depth,
            started.elapsed()
        );
    }
}
