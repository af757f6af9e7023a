// ABOUTME: Value types representing Lisp data, expressions, and functions

use crate::env::Environment;
use crate::parser::{escape, Reader};
use std::fmt;
use std::rc::Rc;

/// Error messages are capped at this many bytes after formatting.
pub const MAX_ERR_LEN: usize = 511;

/// Signature shared by every builtin function. Builtins own their
/// argument list and must return either a result or an Err value.
pub type BuiltinFn = fn(&Reader, &Rc<Environment>, Vec<Value>) -> Value;

/// Handle to a native function in the process-wide builtin table.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// A user-defined function: formal parameter names, a quoted body, and
/// the environment the bound arguments live in. The environment belongs
/// to this lambda alone; copies of the lambda deep-copy it.
#[derive(Debug)]
pub struct Lambda {
    pub env: Rc<Environment>,
    pub formals: Vec<String>,
    pub body: Box<Value>,
}

#[derive(Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Sym(String),
    Err(String),
    Ok,
    Sexpr(Vec<Value>),
    Qexpr(Vec<Value>),
    Builtin(Builtin),
    Lambda(Box<Lambda>),
}

impl Value {
    /// Builds an Err value, truncating the message to [`MAX_ERR_LEN`]
    /// bytes on a character boundary.
    pub fn err(msg: impl Into<String>) -> Value {
        let mut msg = msg.into();
        if msg.len() > MAX_ERR_LEN {
            let mut end = MAX_ERR_LEN;
            while !msg.is_char_boundary(end) {
                end -= 1;
            }
            msg.truncate(end);
        }
        Value::Err(msg)
    }

    /// Builds a lambda with a fresh, parentless environment. The parent
    /// is wired to the call site when the lambda is fully applied.
    pub fn lambda(formals: Vec<String>, body: Value) -> Value {
        Value::Lambda(Box::new(Lambda {
            env: Environment::new(),
            formals,
            body: Box::new(body),
        }))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Boolean",
            Value::Str(_) => "String",
            Value::Sym(_) => "Symbol",
            Value::Err(_) => "Error",
            Value::Ok => "OK",
            Value::Sexpr(_) => "S-Expression",
            Value::Qexpr(_) => "Q-Expression",
            Value::Builtin(_) | Value::Lambda(_) => "Function",
        }
    }

    pub fn is_num(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_sym(&self) -> bool {
        matches!(self, Value::Sym(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn is_qexpr(&self) -> bool {
        matches!(self, Value::Qexpr(_))
    }

    /// S- and Q-Expressions are the two expression shapes.
    pub fn is_expr(&self) -> bool {
        matches!(self, Value::Sexpr(_) | Value::Qexpr(_))
    }

    /// Structural equality. Values of different variants are unequal
    /// (Integer 1 and Float 1.0 do not compare equal). Lambdas compare
    /// by formals and body; the captured environment is ignored. OK is
    /// unequal to everything, itself included.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::fn_addr_eq(a.func, b.func),
            (Value::Lambda(a), Value::Lambda(b)) => {
                a.formals == b.formals && a.body.equals(&b.body)
            }
            (Value::Sexpr(a), Value::Sexpr(b)) | (Value::Qexpr(a), Value::Qexpr(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Int(n) => Value::Int(*n),
            Value::Float(n) => Value::Float(*n),
            Value::Bool(b) => Value::Bool(*b),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Sym(s) => Value::Sym(s.clone()),
            Value::Err(msg) => Value::Err(msg.clone()),
            Value::Ok => Value::Ok,
            Value::Sexpr(cells) => Value::Sexpr(cells.clone()),
            Value::Qexpr(cells) => Value::Qexpr(cells.clone()),
            Value::Builtin(b) => Value::Builtin(*b),
            // Each copy of a lambda owns an independent environment, so
            // closures never observe each other's bindings.
            Value::Lambda(l) => Value::Lambda(Box::new(Lambda {
                env: l.env.deep_copy(),
                formals: l.formals.clone(),
                body: l.body.clone(),
            })),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, cells: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", cell)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:.3}", n),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Str(s) => write!(f, "\"{}\"", escape(s)),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Err(msg) => write!(f, "Error: {}", msg),
            Value::Ok => write!(f, "OK"),
            Value::Sexpr(cells) => write_seq(f, cells, '(', ')'),
            Value::Qexpr(cells) => write_seq(f, cells, '{', '}'),
            Value::Builtin(_) => write!(f, "<function>"),
            Value::Lambda(l) => {
                write!(f, "(\\ {{{}}} {})", l.formals.join(" "), l.body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(format!("{}", Value::Int(42)), "42");
        assert_eq!(format!("{}", Value::Int(-7)), "-7");
        assert_eq!(format!("{}", Value::Float(2.5)), "2.500");
        assert_eq!(format!("{}", Value::Float(-0.125)), "-0.125");
    }

    #[test]
    fn test_bool_and_ok_display() {
        assert_eq!(format!("{}", Value::Bool(true)), "true");
        assert_eq!(format!("{}", Value::Bool(false)), "false");
        assert_eq!(format!("{}", Value::Ok), "OK");
    }

    #[test]
    fn test_string_display_reapplies_escapes() {
        let s = Value::Str("a\"b\nc".to_string());
        assert_eq!(format!("{}", s), "\"a\\\"b\\nc\"");
    }

    #[test]
    fn test_expr_display() {
        let sexpr = Value::Sexpr(vec![
            Value::Sym("+".to_string()),
            Value::Int(1),
            Value::Sexpr(vec![Value::Sym("*".to_string()), Value::Int(2), Value::Int(3)]),
        ]);
        assert_eq!(format!("{}", sexpr), "(+ 1 (* 2 3))");

        let qexpr = Value::Qexpr(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(format!("{}", qexpr), "{1 2}");

        assert_eq!(format!("{}", Value::Sexpr(vec![])), "()");
        assert_eq!(format!("{}", Value::Qexpr(vec![])), "{}");
    }

    #[test]
    fn test_lambda_display() {
        let lambda = Value::lambda(
            vec!["x".to_string(), "y".to_string()],
            Value::Qexpr(vec![
                Value::Sym("+".to_string()),
                Value::Sym("x".to_string()),
                Value::Sym("y".to_string()),
            ]),
        );
        assert_eq!(format!("{}", lambda), "(\\ {x y} {+ x y})");
    }

    #[test]
    fn test_error_display_and_cap() {
        assert_eq!(
            format!("{}", Value::err("unbound symbol 'x'")),
            "Error: unbound symbol 'x'"
        );

        let long = "x".repeat(2000);
        match Value::err(long) {
            Value::Err(msg) => assert_eq!(msg.len(), MAX_ERR_LEN),
            _ => panic!("Expected Err"),
        }
    }

    #[test]
    fn test_equals_is_tag_strict() {
        assert!(Value::Int(1).equals(&Value::Int(1)));
        assert!(!Value::Int(1).equals(&Value::Float(1.0)));
        assert!(!Value::Bool(true).equals(&Value::Int(1)));
        assert!(Value::Str("a".to_string()).equals(&Value::Str("a".to_string())));
        assert!(!Value::Str("a".to_string()).equals(&Value::Sym("a".to_string())));
    }

    #[test]
    fn test_equals_composite() {
        let a = Value::Qexpr(vec![Value::Int(1), Value::Qexpr(vec![Value::Int(2)])]);
        let b = Value::Qexpr(vec![Value::Int(1), Value::Qexpr(vec![Value::Int(2)])]);
        let c = Value::Qexpr(vec![Value::Int(1), Value::Qexpr(vec![Value::Int(3)])]);
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_ok_never_equals() {
        assert!(!Value::Ok.equals(&Value::Ok));
    }

    #[test]
    fn test_lambda_equality_ignores_env() {
        let a = Value::lambda(
            vec!["x".to_string()],
            Value::Qexpr(vec![Value::Sym("x".to_string())]),
        );
        let b = Value::lambda(
            vec!["x".to_string()],
            Value::Qexpr(vec![Value::Sym("x".to_string())]),
        );
        if let Value::Lambda(l) = &a {
            l.env.put("hidden", Value::Int(1));
        }
        assert!(a.equals(&b));

        let c = Value::lambda(
            vec!["y".to_string()],
            Value::Qexpr(vec![Value::Sym("x".to_string())]),
        );
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_clone_deep_copies_lambda_env() {
        let original = Value::lambda(vec!["x".to_string()], Value::Qexpr(vec![]));
        let copy = original.clone();

        if let Value::Lambda(l) = &copy {
            l.env.put("a", Value::Int(1));
        }
        if let Value::Lambda(l) = &original {
            match l.env.get("a") {
                Value::Err(_) => {}
                other => panic!("binding leaked into original: {}", other),
            }
        }
    }
}
