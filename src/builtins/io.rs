//! External I/O: load, parse, read, error
//!
//! `load` runs a source file through the reader and evaluates each
//! top-level expression, printing Error values and carrying on. `parse`
//! reads a string into a value tree. `read` prompts the line editor and
//! binds the reply. `error` constructs an Error value.

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::eval;
use crate::parser::Reader;
use crate::read;
use crate::value::Value;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Reads, parses, and evaluates a source file. Error values produced by
/// top-level expressions are printed and skipped; the result is OK
/// unless the file cannot be read or parsed.
pub fn load_file(reader: &Reader, env: &Rc<Environment>, path: &Path) -> Value {
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => return Value::err(format!("Could not load Library {}", e)),
    };

    let ast = match reader.parse(&src) {
        Ok(ast) => ast,
        Err(e) => return Value::err(format!("Could not load Library {}", e)),
    };

    if let Value::Sexpr(cells) = read::read(&ast) {
        for cell in cells {
            let result = eval::eval(reader, env, cell);
            if result.is_err() {
                println!("{}", result);
            }
        }
    }
    Value::Ok
}

pub fn builtin_load(reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("load", args, 1);
    lassert_type!("load", args, 0, is_str, "String");

    match args.remove(0) {
        Value::Str(path) => load_file(reader, env, Path::new(&path)),
        other => other,
    }
}

pub fn builtin_parse(reader: &Reader, _env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("parse", args, 1);
    lassert_type!("parse", args, 0, is_str, "String");

    match args.remove(0) {
        Value::Str(text) => match reader.parse(&text) {
            Ok(ast) => read::read(&ast),
            Err(_) => Value::err(format!("Unable to parse {}", text)),
        },
        other => other,
    }
}

pub fn builtin_read(_reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("read", args, 1);
    lassert_type!("read", args, 0, is_sym, "Symbol");

    let name = match args.remove(0) {
        Value::Sym(name) => name,
        other => return other,
    };

    let prompt = format!("{} > ", name);
    match prompt_line(&prompt) {
        Some(line) if !line.is_empty() => {
            let value = Value::Str(line);
            env.put(&name, value.clone());
            value
        }
        _ => Value::err(format!("Unable to read input for {}", name)),
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    let mut editor = rustyline::DefaultEditor::new().ok()?;
    editor.readline(prompt).ok()
}

pub fn builtin_error(_reader: &Reader, _env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("error", args, 1);
    lassert_type!("error", args, 0, is_str, "String");

    match args.remove(0) {
        Value::Str(msg) => Value::err(msg),
        other => other,
    }
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, "load", builtin_load);
    add_builtin(env, "parse", builtin_parse);
    add_builtin(env, "read", builtin_read);
    add_builtin(env, "error", builtin_error);
}
