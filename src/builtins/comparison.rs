//! Comparison operations: <, >, <=, >= and ==, !=
//!
//! Ordering takes exactly two numeric arguments and promotes mixed
//! Integer/Float pairs. Equality takes two arguments of any type and is
//! structural; values of different variants are never equal.

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::parser::Reader;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_gt(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_ord(args, ">")
}

pub fn builtin_lt(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_ord(args, "<")
}

pub fn builtin_gte(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_ord(args, ">=")
}

pub fn builtin_lte(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_ord(args, "<=")
}

pub fn builtin_eq(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_cmp(args, "==")
}

pub fn builtin_ne(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    builtin_cmp(args, "!=")
}

fn builtin_ord(mut args: Vec<Value>, op: &str) -> Value {
    lassert_num!(op, args, 2);
    for (i, arg) in args.iter().enumerate() {
        lassert!(
            arg.is_num(),
            "Function '{}' passed incorrect type for argument {}. Got {}, Expected Integer or Float.",
            op,
            i,
            arg.type_name()
        );
    }

    let y = args.remove(1);
    let x = args.remove(0);
    let r = match (x, y) {
        (Value::Int(a), Value::Int(b)) => ordered(&a, &b, op),
        (Value::Int(a), Value::Float(b)) => ordered(&(a as f64), &b, op),
        (Value::Float(a), Value::Int(b)) => ordered(&a, &(b as f64), op),
        (Value::Float(a), Value::Float(b)) => ordered(&a, &b, op),
        _ => false,
    };
    Value::Bool(r)
}

fn ordered<T: PartialOrd>(a: &T, b: &T, op: &str) -> bool {
    match op {
        ">" => a > b,
        "<" => a < b,
        ">=" => a >= b,
        "<=" => a <= b,
        _ => false,
    }
}

fn builtin_cmp(args: Vec<Value>, op: &str) -> Value {
    lassert_num!(op, args, 2);
    let r = args[0].equals(&args[1]);
    Value::Bool(if op == "!=" { !r } else { r })
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, ">", builtin_gt);
    add_builtin(env, "<", builtin_lt);
    add_builtin(env, ">=", builtin_gte);
    add_builtin(env, "<=", builtin_lte);
    add_builtin(env, "==", builtin_eq);
    add_builtin(env, "!=", builtin_ne);
}
