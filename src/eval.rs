// ABOUTME: Evaluator: S-expression reduction and the function call protocol

use crate::builtins::lists;
use crate::env::Environment;
use crate::parser::Reader;
use crate::value::{Lambda, Value};
use std::rc::Rc;

/// Evaluates one value. Symbols resolve through the environment,
/// S-Expressions reduce, everything else evaluates to itself.
pub fn eval(reader: &Reader, env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::Sym(name) => env.get(&name),
        Value::Sexpr(cells) => eval_sexpr(reader, env, cells),
        other => other,
    }
}

fn eval_sexpr(reader: &Reader, env: &Rc<Environment>, cells: Vec<Value>) -> Value {
    // Evaluate children left to right. A `defmacro` symbol stops child
    // evaluation after itself, so the definition receives its operands
    // as raw, unevaluated forms.
    let mut evaluated = Vec::with_capacity(cells.len());
    let mut iter = cells.into_iter();
    for cell in iter.by_ref() {
        let is_macro = matches!(&cell, Value::Sym(s) if s == "defmacro");
        evaluated.push(eval(reader, env, cell));
        if is_macro {
            break;
        }
    }
    evaluated.extend(iter);

    // The first Error wins; the remaining children are dropped.
    if let Some(pos) = evaluated.iter().position(Value::is_err) {
        return evaluated.swap_remove(pos);
    }

    match evaluated.len() {
        0 => Value::Sexpr(evaluated),
        1 => {
            let only = evaluated.remove(0);
            eval(reader, env, only)
        }
        _ => {
            let f = evaluated.remove(0);
            call(reader, env, f, evaluated)
        }
    }
}

/// Applies a function value to already-evaluated arguments.
pub fn call(reader: &Reader, env: &Rc<Environment>, f: Value, args: Vec<Value>) -> Value {
    match f {
        Value::Builtin(b) => (b.func)(reader, env, args),
        Value::Lambda(l) => call_lambda(reader, env, l, args),
        other => Value::err(format!(
            "S-Expression starts with incorrect type. Got {}, Expected Function.",
            other.type_name()
        )),
    }
}

fn call_lambda(
    reader: &Reader,
    env: &Rc<Environment>,
    mut l: Box<Lambda>,
    mut args: Vec<Value>,
) -> Value {
    let given = args.len();
    let total = l.formals.len();

    while !args.is_empty() {
        if l.formals.is_empty() {
            return Value::err(format!(
                "Function passed too many arguments. Got {}, Expected {}.",
                given, total
            ));
        }

        let formal = l.formals.remove(0);

        // `&` binds the following formal to the remaining arguments.
        if formal == "&" {
            if l.formals.len() != 1 {
                return Value::err(
                    "Function format invalid. Symbol '&' not followed by a single symbol.",
                );
            }
            let rest = l.formals.remove(0);
            l.env.put(&rest, Value::Qexpr(std::mem::take(&mut args)));
            break;
        }

        let value = args.remove(0);
        l.env.put(&formal, value);
    }

    // A dangling `&` means a variadic call with no trailing arguments.
    if l.formals.first().map(String::as_str) == Some("&") {
        if l.formals.len() != 2 {
            return Value::err(
                "Function format invalid. Symbol '&' not followed by a single symbol.",
            );
        }
        l.formals.remove(0);
        let rest = l.formals.remove(0);
        l.env.put(&rest, Value::Qexpr(Vec::new()));
    }

    if l.formals.is_empty() {
        // Fully applied: the call site becomes the lexical parent and
        // the quoted body is forced as an S-Expression.
        let Lambda {
            env: lambda_env,
            body,
            ..
        } = *l;
        lambda_env.set_parent(Rc::clone(env));
        lists::builtin_eval(reader, &lambda_env, vec![*body])
    } else {
        // Partial application: hand back the partially bound function.
        Value::Lambda(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::read;

    fn setup() -> (Reader, Rc<Environment>) {
        let reader = Reader::new();
        let env = Environment::new();
        register_builtins(&env);
        (reader, env)
    }

    /// Evaluates each top-level expression of `src`, returning the last
    /// result.
    fn run(reader: &Reader, env: &Rc<Environment>, src: &str) -> Value {
        let ast = reader.parse(src).expect("parse failed");
        match read::read(&ast) {
            Value::Sexpr(cells) => {
                let mut last = Value::Sexpr(Vec::new());
                for cell in cells {
                    last = eval(reader, env, cell);
                }
                last
            }
            other => other,
        }
    }

    fn run_str(src: &str) -> String {
        let (reader, env) = setup();
        format!("{}", run(&reader, &env, src))
    }

    #[test]
    fn test_atoms_self_evaluate() {
        assert_eq!(run_str("5"), "5");
        assert_eq!(run_str("2.5"), "2.500");
        assert_eq!(run_str("true"), "true");
        assert_eq!(run_str("\"hi\""), "\"hi\"");
    }

    #[test]
    fn test_qexpr_self_evaluates() {
        assert_eq!(run_str("{1 2 (+ 1 2)}"), "{1 2 (+ 1 2)}");
    }

    #[test]
    fn test_empty_sexpr_evaluates_to_itself() {
        assert_eq!(run_str("()"), "()");
    }

    #[test]
    fn test_single_child_unwraps_and_reevaluates() {
        assert_eq!(run_str("(5)"), "5");
        assert_eq!(run_str("((+ 1 2))"), "3");
    }

    #[test]
    fn test_symbol_lookup() {
        let (reader, env) = setup();
        env.put("x", Value::Int(9));
        assert_eq!(format!("{}", run(&reader, &env, "x")), "9");
    }

    #[test]
    fn test_unbound_symbol() {
        assert_eq!(run_str("nope"), "Error: unbound symbol 'nope'");
    }

    #[test]
    fn test_arithmetic_application() {
        assert_eq!(run_str("(+ 1 2 3)"), "6");
        assert_eq!(run_str("(+ 1 2.0)"), "3.000");
        assert_eq!(run_str("(* (+ 1 2) 3)"), "9");
        assert_eq!(run_str("(/ 5 0)"), "Error: Division by zero");
    }

    #[test]
    fn test_first_error_wins_and_siblings_are_dropped() {
        assert_eq!(run_str("(+ 1 (/ 5 0) nope)"), "Error: Division by zero");
    }

    #[test]
    fn test_non_function_head() {
        assert_eq!(
            run_str("(1 2 3)"),
            "Error: S-Expression starts with incorrect type. Got Integer, Expected Function."
        );
    }

    #[test]
    fn test_def_then_use() {
        assert_eq!(run_str("(def {x} 10) (+ x 5)"), "15");
    }

    #[test]
    fn test_lambda_application() {
        assert_eq!(run_str("((\\ {x y} {+ x y}) 2 3)"), "5");
    }

    #[test]
    fn test_fun_and_closure_over_call_site() {
        let src = "(def {n} 100) (fun {addn x} {+ x n}) (addn 1)";
        assert_eq!(run_str(src), "101");
    }

    #[test]
    fn test_partial_application() {
        let src = "(fun {add a b} {+ a b}) (def {add2} (add 2)) (add2 3)";
        assert_eq!(run_str(src), "5");

        // Immediate application of the partial result.
        assert_eq!(run_str("(fun {add a b} {+ a b}) ((add 2) 3)"), "5");
    }

    #[test]
    fn test_partial_application_prints_remaining_formals() {
        assert_eq!(run_str("((\\ {a b} {+ a b}) 1)"), "(\\ {b} {+ a b})");
    }

    #[test]
    fn test_too_many_arguments() {
        assert_eq!(
            run_str("((\\ {x} {x}) 1 2)"),
            "Error: Function passed too many arguments. Got 2, Expected 1."
        );
    }

    #[test]
    fn test_variadic_tail() {
        assert_eq!(run_str("((\\ {& xs} {xs}) 1 2 3)"), "{1 2 3}");
        assert_eq!(run_str("((\\ {x & xs} {xs}) 1)"), "{}");
        assert_eq!(run_str("((\\ {x & xs} {xs}) 1 2 3)"), "{2 3}");
    }

    #[test]
    fn test_variadic_call_with_no_arguments_at_all() {
        let (reader, env) = setup();
        let f = run(&reader, &env, "(\\ {& xs} {xs})");
        match call(&reader, &env, f, Vec::new()) {
            Value::Qexpr(cells) => assert!(cells.is_empty()),
            other => panic!("Expected empty Qexpr, got {}", other),
        }
    }

    #[test]
    fn test_variadic_format_error() {
        assert_eq!(
            run_str("((\\ {& a b} {a}) 1)"),
            "Error: Function format invalid. Symbol '&' not followed by a single symbol."
        );
    }

    #[test]
    fn test_calls_do_not_mutate_the_bound_function() {
        let src = "(fun {add a b} {+ a b}) (def {add1} (add 1)) (add 10 20) (add1 2)";
        assert_eq!(run_str(src), "3");
    }

    #[test]
    fn test_macro_short_circuit_keeps_body_unevaluated() {
        let (reader, env) = setup();
        run(&reader, &env, "(defmacro m {+ 1 2})");
        // The body was bound raw, not as 3.
        assert_eq!(format!("{}", env.get("m")), "{+ 1 2}");
    }

    #[test]
    fn test_defmacro_function_form() {
        let src = "(defmacro (twice x) {+ x x}) (twice 4)";
        assert_eq!(run_str(src), "8");
    }

    #[test]
    fn test_if_with_comparison() {
        assert_eq!(run_str("(if (> 3 2) {\"yes\"} {\"no\"})"), "\"yes\"");
        assert_eq!(run_str("(if (== 1 1.0) {1} {2})"), "2");
    }

    #[test]
    fn test_head_tail_join_round_trip() {
        assert_eq!(run_str("(join (head {1 2 3}) (tail {1 2 3}))"), "{1 2 3}");
        assert_eq!(run_str("(== (join (head {1 2}) (tail {1 2})) {1 2})"), "true");
    }

    #[test]
    fn test_bracket_list_sugar() {
        assert_eq!(run_str("[1 2 3]"), "{1 2 3}");
        assert_eq!(run_str("(head [1 2])"), "{1}");
    }

    #[test]
    fn test_eval_builtin_forces_quotes() {
        assert_eq!(run_str("(eval {+ 1 2})"), "3");
        assert_eq!(run_str("(eval (list + 1 2))"), "3");
    }
}
