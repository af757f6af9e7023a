//! List operations: list, head, tail, join, eval
//!
//! Q-Expressions are the list type; `head` and `tail` also work on
//! Strings. `join` concatenates Strings byte-wise or Q-Expressions
//! element-wise, promoting Strings to one-element lists when mixed.
//! `eval` retypes a quoted expression to an S-Expression and reduces it.

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::eval;
use crate::parser::Reader;
use crate::value::Value;
use std::rc::Rc;

/// Turns the argument list into a Q-Expression of the same children.
pub fn builtin_list(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    Value::Qexpr(args)
}

pub fn builtin_head(_reader: &Reader, _env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("head", args, 1);

    match args.remove(0) {
        Value::Qexpr(mut cells) => {
            lassert!(!cells.is_empty(), "Function 'head' passed {{}}.");
            cells.truncate(1);
            Value::Qexpr(cells)
        }
        Value::Str(s) => {
            lassert!(!s.is_empty(), "Function 'head' passed empty string");
            match s.chars().next() {
                Some(c) => Value::Str(c.to_string()),
                None => Value::Str(String::new()),
            }
        }
        other => Value::err(format!(
            "Function 'head' passed incorrect type for argument 0. Got {}, Expected Q-Expression or String.",
            other.type_name()
        )),
    }
}

pub fn builtin_tail(_reader: &Reader, _env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("tail", args, 1);

    match args.remove(0) {
        Value::Qexpr(mut cells) => {
            lassert!(!cells.is_empty(), "Function 'tail' passed {{}}.");
            cells.remove(0);
            Value::Qexpr(cells)
        }
        Value::Str(s) => {
            lassert!(!s.is_empty(), "Function 'tail' passed empty string");
            let mut chars = s.chars();
            chars.next();
            Value::Str(chars.as_str().to_string())
        }
        other => Value::err(format!(
            "Function 'tail' passed incorrect type for argument 0. Got {}, Expected Q-Expression or String.",
            other.type_name()
        )),
    }
}

pub fn builtin_join(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    for (i, arg) in args.iter().enumerate() {
        lassert!(
            arg.is_qexpr() || arg.is_str(),
            "Function 'join' passed incorrect type for argument {}. Got {}, Expected Q-Expression or String.",
            i,
            arg.type_name()
        );
    }

    let mut args = args.into_iter();
    let Some(mut x) = args.next() else {
        return Value::err(
            "Function 'join' passed incorrect number of arguments. Got 0, Expected at least 1.",
        );
    };
    for y in args {
        x = join_two(x, y);
    }
    x
}

fn join_two(x: Value, y: Value) -> Value {
    match (x, y) {
        (Value::Str(mut a), Value::Str(b)) => {
            a.push_str(&b);
            Value::Str(a)
        }
        (x, y) => {
            let mut cells = into_cells(x);
            cells.extend(into_cells(y));
            Value::Qexpr(cells)
        }
    }
}

/// A String mixed into a Q-Expression join becomes a one-element list.
fn into_cells(v: Value) -> Vec<Value> {
    match v {
        Value::Qexpr(cells) => cells,
        other => vec![other],
    }
}

/// Retypes a quoted expression to an S-Expression and evaluates it.
pub fn builtin_eval(reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("eval", args, 1);

    match args.remove(0) {
        Value::Sexpr(cells) | Value::Qexpr(cells) => eval::eval(reader, env, Value::Sexpr(cells)),
        other => Value::err(format!(
            "Function 'eval' passed incorrect type for argument 0. Got {}, Expected Q-Expression or S-Expression.",
            other.type_name()
        )),
    }
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, "list", builtin_list);
    add_builtin(env, "head", builtin_head);
    add_builtin(env, "tail", builtin_tail);
    add_builtin(env, "join", builtin_join);
    add_builtin(env, "eval", builtin_eval);
}
