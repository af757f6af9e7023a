// ABOUTME: Tree ingestion: converting the reader's syntax tree into values

use crate::builtins::lists;
use crate::parser::{unescape, Ast};
use crate::value::{Builtin, Value};

/// Converts one reader node into a value. Composite nodes recurse into
/// their children, skipping bracket punctuation and comments; the
/// bracket-list form `[a b]` becomes `(list a b)`.
pub fn read(node: &Ast) -> Value {
    if node.tag.contains("integer") {
        return read_int(node);
    }
    if node.tag.contains("float") {
        return read_float(node);
    }
    if node.tag.contains("bool") {
        return read_bool(node);
    }
    if node.tag.contains("string") {
        return read_str(node);
    }
    if node.tag.contains("symbol") {
        return Value::Sym(node.contents.clone());
    }

    let mut cells = Vec::new();
    if node.tag.contains("list") {
        cells.push(Value::Builtin(Builtin {
            name: "list",
            func: lists::builtin_list,
        }));
    }
    for child in &node.children {
        if skip(child) {
            continue;
        }
        cells.push(read(child));
    }

    if node.tag.contains("qexpr") {
        Value::Qexpr(cells)
    } else {
        // The program root, sexprs, and the desugared bracket list.
        Value::Sexpr(cells)
    }
}

fn skip(node: &Ast) -> bool {
    matches!(node.contents.as_str(), "(" | ")" | "{" | "}" | "[" | "]")
        || node.tag.contains("comment")
        || node.tag == "regex"
}

fn read_int(node: &Ast) -> Value {
    match node.contents.parse::<i64>() {
        Ok(n) => Value::Int(n),
        Err(_) => Value::err("invalid integer"),
    }
}

fn read_float(node: &Ast) -> Value {
    match node.contents.parse::<f64>() {
        Ok(n) => Value::Float(n),
        Err(_) => Value::err("invalid float"),
    }
}

fn read_bool(node: &Ast) -> Value {
    match node.contents.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::err(format!("Unable to parse boolean value: {}", other)),
    }
}

fn read_str(node: &Ast) -> Value {
    // The reader keeps the surrounding quotes in `contents`.
    let inner = &node.contents[1..node.contents.len() - 1];
    Value::Str(unescape(inner))
}
