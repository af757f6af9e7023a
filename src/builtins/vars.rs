//! Binding forms: def, =, \, fun, defmacro
//!
//! `def` binds at the root of the environment chain, `=` in the current
//! environment. `\` constructs a lambda, `fun` is sugar for a named
//! lambda, and `defmacro` binds its right-hand side without evaluating
//! it (the evaluator stops child evaluation when it sees the `defmacro`
//! symbol).

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::parser::Reader;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_def(_reader: &Reader, env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_var(env, args, "def")
}

pub fn builtin_put(_reader: &Reader, env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_var(env, args, "=")
}

fn builtin_var(env: &Rc<Environment>, mut args: Vec<Value>, func: &str) -> Value {
    lassert!(
        !args.is_empty(),
        "Function '{}' passed incorrect number of arguments. Got 0, Expected at least 1.",
        func
    );

    let syms = match args.remove(0) {
        Value::Qexpr(cells) => cells,
        other => {
            return Value::err(format!(
                "Function '{}' passed incorrect type for argument 0. Got {}, Expected Q-Expression.",
                func,
                other.type_name()
            ))
        }
    };

    let mut names = Vec::with_capacity(syms.len());
    for sym in syms {
        match sym {
            Value::Sym(name) => names.push(name),
            other => {
                return Value::err(format!(
                    "Function '{}' cannot redefine non-symbol. Got {}, Expected Symbol",
                    func,
                    other.type_name()
                ))
            }
        }
    }

    lassert!(
        names.len() == args.len(),
        "Function '{}' passed wrong number of arguments for symbols. Got {}, Expected {}",
        func,
        args.len(),
        names.len()
    );

    for (name, value) in names.iter().zip(args) {
        if func == "def" {
            env.def(name, value);
        } else {
            env.put(name, value);
        }
    }
    Value::Ok
}

/// `(\ {formals} {body})` — constructs a lambda value.
pub fn builtin_lambda(_reader: &Reader, _env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("\\", args, 2);
    for i in [0, 1] {
        lassert!(
            args[i].is_expr(),
            "Function '\\' passed incorrect type for argument {}. Got {}, Expected Q-Expression or S-Expression.",
            i,
            args[i].type_name()
        );
    }

    let formals = match args.remove(0) {
        Value::Sexpr(cells) | Value::Qexpr(cells) => cells,
        other => return other,
    };
    let mut names = Vec::with_capacity(formals.len());
    for cell in formals {
        match cell {
            Value::Sym(name) => names.push(name),
            other => {
                return Value::err(format!(
                    "Cannot define a non-symbol. Got {}, Expected Symbol.",
                    other.type_name()
                ))
            }
        }
    }

    let body = args.remove(0);
    Value::lambda(names, body)
}

/// `(fun {name args…} {body})` — sugar for binding a named lambda in
/// the current environment.
pub fn builtin_fun(_reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("fun", args, 2);
    for i in [0, 1] {
        lassert!(
            args[i].is_qexpr(),
            "Function 'fun' passed incorrect type for argument {}. Got {}, Expected Q-Expression.",
            i,
            args[i].type_name()
        );
    }

    let def = match args.remove(0) {
        Value::Qexpr(cells) => cells,
        other => return other,
    };
    lassert!(!def.is_empty(), "Function 'fun' passed {{}}.");

    let mut names = Vec::with_capacity(def.len());
    for cell in def {
        match cell {
            Value::Sym(name) => names.push(name),
            other => {
                return Value::err(format!(
                    "Function 'fun' cannot define non-symbol. Got {}, Expected Symbol",
                    other.type_name()
                ))
            }
        }
    }

    let name = names.remove(0);
    let body = args.remove(0);
    env.put(&name, Value::lambda(names, body));
    Value::Ok
}

/// `(defmacro name body)` binds the raw body at the root;
/// `(defmacro (name args…) body)` desugars to a lambda bound locally.
/// Either way the evaluator has left both operands unevaluated.
pub fn builtin_defmacro(_reader: &Reader, env: &Rc<Environment>, mut args: Vec<Value>) -> Value {
    lassert_num!("defmacro", args, 2);

    let body = args.remove(1);
    match args.remove(0) {
        Value::Sym(name) => {
            env.def(&name, body);
            Value::Ok
        }
        Value::Sexpr(cells) => {
            lassert!(!cells.is_empty(), "Function 'defmacro' passed ().");
            let mut names = Vec::with_capacity(cells.len());
            for cell in cells {
                match cell {
                    Value::Sym(name) => names.push(name),
                    other => {
                        return Value::err(format!(
                            "Function 'defmacro' cannot define non-symbol. Got {}, Expected Symbol",
                            other.type_name()
                        ))
                    }
                }
            }
            let name = names.remove(0);
            env.put(&name, Value::lambda(names, body));
            Value::Ok
        }
        other => Value::err(format!(
            "Function 'defmacro' takes symbol or s-expression. Got {}",
            other.type_name()
        )),
    }
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, "def", builtin_def);
    add_builtin(env, "=", builtin_put);
    add_builtin(env, "\\", builtin_lambda);
    add_builtin(env, "fun", builtin_fun);
    add_builtin(env, "defmacro", builtin_defmacro);
}
