use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use lauren::{BytecodeCompiler, CompileOptions, render_error};
use lauren_core::parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use thiserror::Error;
use tracing::debug;

/// Lauren - compile programs to stack-machine bytecode
#[derive(Parser, Debug)]
#[command(name = "lauren")]
#[command(about = "Compile Lauren programs to bytecode", long_about = None)]
struct Args {
    /// Print the parse tree (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Only check that the program compiles; print nothing on success
    #[arg(long)]
    check: bool,

    /// Print the bytecode as JSON instead of a listing
    #[arg(long, conflicts_with = "check")]
    json: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Read the program from a file
    #[arg(long, short, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Program to compile (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Debug, Error, miette::Diagnostic)]
#[error("compilation failed")]
struct CompilationFailed;

fn read_source(args: &Args) -> Result<String> {
    if let Some(expr) = &args.expression {
        return Ok(expr.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()));
    }

    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .into_diagnostic()
        .wrap_err("Failed to read program from stdin")?;
    Ok(source)
}

fn compile_input(args: &Args, source: &str) -> Result<()> {
    if args.debug_parse {
        match parser::parse_with_max_depth(source, args.max_depth) {
            Ok(tree) => {
                println!("=== Parse Tree ===");
                print!("{}", tree.render());
                println!();
            }
            Err(e) => {
                render_error(&e.into());
                return Err(CompilationFailed.into());
            }
        }
    }

    let compiler = BytecodeCompiler::new(CompileOptions {
        max_depth: args.max_depth,
    });
    let code = match compiler.compile(source) {
        Ok(code) => code,
        Err(e) => {
            render_error(&e);
            return Err(CompilationFailed.into());
        }
    };
    debug!(instructions = code.len(), "compiled");

    if args.check {
        return Ok(());
    }
    if args.json {
        let json = serde_json::to_string_pretty(&code).into_diagnostic()?;
        println!("{}", json);
    } else {
        print!("{}", code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let source = read_source(&args)?;
    compile_input(&args, &source)
}
