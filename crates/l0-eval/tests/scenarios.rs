//! End-to-end parse-and-evaluate scenarios exercising the evaluator,
//! macro expander, and quasiquote expander together against a fully
//! registered primitive table.

use l0_eval::eval;
use l0_mem::Arena;
use l0_syntax::{L0Error, Parser, Value};

fn run_all(source: &str) -> Value<'static> {
    let arena = Box::leak(Box::new(Arena::with_defaults()));
    let env = l0_env::create_global(arena).unwrap();
    l0_primitives::register_primitives(env, arena).unwrap();
    let forms = Parser::parse_string_all(source, arena)
        .unwrap()
        .list_to_vec()
        .unwrap();
    let mut result = Value::Nil;
    for form in forms {
        result = eval(form, env, arena).unwrap();
    }
    result
}

fn run_all_err(source: &str) -> L0Error {
    let arena = Arena::with_defaults();
    let env = l0_env::create_global(&arena).unwrap();
    l0_primitives::register_primitives(env, &arena).unwrap();
    let forms = Parser::parse_string_all(source, &arena)
        .unwrap()
        .list_to_vec()
        .unwrap();
    let mut last = Ok(Value::Nil);
    for form in forms {
        last = eval(form, env, &arena);
        if last.is_err() {
            break;
        }
    }
    last.unwrap_err()
}

#[test]
fn sums_three_integers() {
    assert!(matches!(run_all("(+ 1 2 3)"), Value::Integer(6)));
}

#[test]
fn mixed_integer_and_float_promotes_to_float() {
    match run_all("(+ 1 2.0)") {
        Value::Float(f) => assert!((f - 3.0).abs() < 1e-9),
        other => panic!("expected a float, got {other:?}"),
    }
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let err = run_all_err("(/ 1 0)");
    assert!(matches!(err, L0Error::RuntimeDivisionByZero { .. }));
}

#[test]
fn let_binds_a_local_variable() {
    assert!(matches!(run_all("(let ((x 5)) (+ x 1))"), Value::Integer(6)));
}

#[test]
fn recursive_factorial() {
    let source = r#"
(define (fact n)
  (if (= n 0)
      1
      (* n (fact (- n 1)))))
(fact 3)
"#;
    assert!(matches!(run_all(source), Value::Integer(6)));
}

#[test]
fn begin_define_and_set_bang() {
    let source = "(begin (define x 10) (set! x (+ x 1)) x)";
    assert!(matches!(run_all(source), Value::Integer(11)));
}

#[test]
fn defmacro_and_when_style_macro() {
    let source = r#"
(defmacro my-when (c body) (list 'if c body #f))
(my-when (> 5 0) 42)
"#;
    assert!(matches!(run_all(source), Value::Integer(42)));
}

#[test]
fn quasiquote_unquote_splicing() {
    let source = "(define rest (list 2 3)) `(1 ,@rest)";
    let value = run_all(source);
    let items = value.list_to_vec().unwrap();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], Value::Integer(1)));
    assert!(matches!(items[1], Value::Integer(2)));
    assert!(matches!(items[2], Value::Integer(3)));
}

#[test]
fn unbound_variable_is_a_runtime_error() {
    let err = run_all_err("not-defined-anywhere");
    assert!(matches!(err, L0Error::RuntimeUnbound { .. }));
}

#[test]
fn unterminated_list_is_a_parse_error_before_evaluation_ever_runs() {
    let arena = Arena::with_defaults();
    let err = Parser::parse_string_all("(a b", &arena).unwrap_err();
    assert!(matches!(err, L0Error::ParseUnexpectedEOF { .. }));
}
