//! Logic operations: &&, ||, !
//!
//! All operands must be Boolean. `&&` and `||` are variadic; their
//! arguments are already evaluated by the time the builtin runs, so the
//! early exit is only a shortcut over the fold.

use crate::builtins::add_builtin;
use crate::env::Environment;
use crate::parser::Reader;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_and(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    for (i, arg) in args.iter().enumerate() {
        lassert!(
            arg.is_bool(),
            "Function '&&' passed incorrect type for argument {}. Got {}, Expected Boolean.",
            i,
            arg.type_name()
        );
    }

    let mut r = true;
    for arg in &args {
        if let Value::Bool(b) = arg {
            r = r && *b;
            if !r {
                break;
            }
        }
    }
    Value::Bool(r)
}

pub fn builtin_or(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    for (i, arg) in args.iter().enumerate() {
        lassert!(
            arg.is_bool(),
            "Function '||' passed incorrect type for argument {}. Got {}, Expected Boolean.",
            i,
            arg.type_name()
        );
    }

    let mut r = false;
    for arg in &args {
        if let Value::Bool(b) = arg {
            r = r || *b;
            if r {
                break;
            }
        }
    }
    Value::Bool(r)
}

pub fn builtin_not(_reader: &Reader, _env: &Rc<Environment>, args: Vec<Value>) -> Value {
    lassert_num!("!", args, 1);
    lassert_type!("!", args, 0, is_bool, "Boolean");

    match args[0] {
        Value::Bool(b) => Value::Bool(!b),
        _ => Value::Bool(false),
    }
}

pub fn register(env: &Rc<Environment>) {
    add_builtin(env, "&&", builtin_and);
    add_builtin(env, "||", builtin_or);
    add_builtin(env, "!", builtin_not);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Reader;

    fn helpers() -> (Reader, Rc<Environment>) {
        (Reader::new(), Environment::new())
    }

    #[test]
    fn test_and() {
        let (r, e) = helpers();
        assert!(matches!(
            builtin_and(&r, &e, vec![Value::Bool(true), Value::Bool(true)]),
            Value::Bool(true)
        ));
        assert!(matches!(
            builtin_and(&r, &e, vec![Value::Bool(true), Value::Bool(false)]),
            Value::Bool(false)
        ));
        assert!(matches!(builtin_and(&r, &e, vec![]), Value::Bool(true)));
    }

    #[test]
    fn test_or() {
        let (r, e) = helpers();
        assert!(matches!(
            builtin_or(&r, &e, vec![Value::Bool(false), Value::Bool(true)]),
            Value::Bool(true)
        ));
        assert!(matches!(
            builtin_or(&r, &e, vec![Value::Bool(false), Value::Bool(false)]),
            Value::Bool(false)
        ));
    }

    #[test]
    fn test_not() {
        let (r, e) = helpers();
        assert!(matches!(
            builtin_not(&r, &e, vec![Value::Bool(true)]),
            Value::Bool(false)
        ));
        assert!(matches!(
            builtin_not(&r, &e, vec![Value::Bool(false)]),
            Value::Bool(true)
        ));
    }

    #[test]
    fn test_type_errors() {
        let (r, e) = helpers();
        match builtin_and(&r, &e, vec![Value::Bool(true), Value::Int(1)]) {
            Value::Err(msg) => assert!(msg.contains("'&&'")),
            other => panic!("Expected Err, got {}", other),
        }
        assert!(matches!(
            builtin_not(&r, &e, vec![Value::Int(0)]),
            Value::Err(_)
        ));
        assert!(matches!(builtin_not(&r, &e, vec![]), Value::Err(_)));
    }
}
