//! # Elf
//!
//! This binary lexes, parses and evaluates `elf-lang` source files.
mod cli;

use cli::{Cli, Commands};
use elf_lang::{evaluator, lexer::Lexer, loader, parser};
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::init();
    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    match args.command {
        Commands::Tokens { file } => run_tokens(&file),
        Commands::Ast { file } => run_ast(&file),
        Commands::Run(rest) => match rest.first() {
            Some(file) => run_program(Path::new(file)),
            None => {
                eprintln!("expected a source file");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_tokens(file: &Path) -> ExitCode {
    let source = match loader::load_source(file) {
        Ok(s) => s,
        Err(e) => return io_failure(file, &e),
    };
    info!("lexing {}", file.display());
    let tokens = Lexer::new(&source).lex();
    for token in &tokens {
        println!("{}", token.to_json_line());
    }
    ExitCode::SUCCESS
}

fn run_ast(file: &Path) -> ExitCode {
    let source = match loader::load_source(file) {
        Ok(s) => s,
        Err(e) => return io_failure(file, &e),
    };
    info!("parsing {}", file.display());
    let tokens = Lexer::new(&source).lex();
    let program = match parser::parse(tokens) {
        Ok(p) => p,
        Err(e) => {
            println!("[Error] {e}");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&program.to_json()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("[Error] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_program(file: &Path) -> ExitCode {
    let source = match loader::load_source(file) {
        Ok(s) => s,
        Err(e) => return io_failure(file, &e),
    };
    info!("running {}", file.display());
    let tokens = Lexer::new(&source).lex();
    let program = match parser::parse(tokens) {
        Ok(p) => p,
        Err(e) => {
            println!("[Error] {e}");
            return ExitCode::FAILURE;
        }
    };

    let env = evaluator::global_env();
    let mut stdout = std::io::stdout();
    match evaluator::eval_program(&program, &env, &mut stdout) {
        Ok(value) => {
            println!("{}", value.repr());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("[Error] {e}");
            ExitCode::FAILURE
        }
    }
}

fn io_failure(file: &Path, err: &std::io::Error) -> ExitCode {
    error!("failed to read {}: {err}", file.display());
    println!("[Error] {err}");
    ExitCode::FAILURE
}
