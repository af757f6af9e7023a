// ABOUTME: CLI entry point: startup, stdlib loading, file mode, and the REPL loop

mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod highlighter;
mod parser;
mod read;
mod value;

use builtins::{io, register_builtins};
use clap::Parser;
use env::Environment;
use highlighter::LispHelper;
use parser::Reader;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;

/// Lisp interpreter with Q-expressions, partial application, and macros
#[derive(Parser, Debug)]
#[command(name = "interp")]
#[command(version = config::VERSION)]
#[command(about = "A Lisp interpreter with Q-expressions and a REPL")]
struct CliArgs {
    /// Source files to load in order (omit to start the REPL)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Skip loading the standard library
    #[arg(long = "no-stdlib")]
    no_stdlib: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let reader = Reader::new();
    let env = Environment::new();
    register_builtins(&env);

    if !args.no_stdlib {
        load_stdlib(&reader, &env);
    }

    if !args.files.is_empty() {
        for file in &args.files {
            let result = io::load_file(&reader, &env, file);
            if result.is_err() {
                println!("{}", result);
            }
        }
        return Ok(());
    }

    repl(&reader, &env)
}

/// Loads `$LISPY_HOME/stdlib.lsp`. A missing file is only worth a note;
/// a broken one prints its Error value. Neither stops startup.
fn load_stdlib(reader: &Reader, env: &Rc<Environment>) {
    let stdlib = config::stdlib_path();
    if !stdlib.exists() {
        eprintln!("warning: standard library not found at {}", stdlib.display());
        return;
    }
    let result = io::load_file(reader, env, &stdlib);
    if result.is_err() {
        println!("{}", result);
    }
}

fn repl(reader: &Reader, env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::with_config(rl_config)
        .map_err(|e| format!("Failed to initialize REPL: {}", e))?;
    rl.set_helper(Some(LispHelper::new()));

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_FOOTER);

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match reader.parse(&line) {
                    Ok(ast) => {
                        let result = eval::eval(reader, env, read::read(&ast));
                        println!("{}", result);
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        }
    }

    Ok(())
}
