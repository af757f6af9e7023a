//! Control flow: if
//!
//! `(if cond then else)` takes a Boolean and two quoted branches; the
//! chosen branch is retyped to an S-Expression and evaluated.

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::eval;
use crate::parser::Reader;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_if(reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("if", args, 3);
    lassert_type!("if", args, 0, is_bool, "Boolean");
    for i in [1, 2] {
        lassert!(
            args[i].is_expr(),
            "Function 'if' passed incorrect type for argument {}. Got {}, Expected Q-Expression or S-Expression.",
            i,
            args[i].type_name()
        );
    }

    let branch = if matches!(args[0], Value::Bool(true)) {
        args.remove(1)
    } else {
        args.remove(2)
    };

    match branch {
        Value::Sexpr(cells) | Value::Qexpr(cells) => eval::eval(reader, env, Value::Sexpr(cells)),
        other => other,
    }
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, "if", builtin_if);
}
