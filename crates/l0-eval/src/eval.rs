//! Expression evaluation and application.

use l0_mem::Arena;
use l0_syntax::{ClosureRecord, Env, L0Error, L0Result, Value};

const EVAL_DEPTH_LIMIT: usize = 1000;
const ARG_EVAL_DEPTH_LIMIT: usize = 1000;

/// Evaluates `expr` in `env`.
pub fn eval<'arena>(expr: Value<'arena>, env: Env<'arena>, arena: &'arena Arena) -> L0Result<Value<'arena>> {
    eval_depth(expr, env, arena, 0)
}

fn eval_depth<'arena>(
    expr: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    if depth > EVAL_DEPTH_LIMIT {
        return Err(L0Error::runtime_stack_overflow(
            "evaluator recursion depth exceeded",
        ));
    }
    match expr {
        Value::Symbol(name) => l0_env::lookup(env, name),
        Value::Pair(cell) => eval_pair(cell.car.get(), cell.cdr.get(), env, arena, depth),
        // Atoms, and values that are themselves already results (a closure
        // or primitive reached via e.g. `(car (list + -))`), evaluate to
        // themselves.
        other => Ok(other),
    }
}

fn eval_pair<'arena>(
    head: Value<'arena>,
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    if let Value::Symbol(name) = head {
        l0_log::trace!("dispatching special form or call head '{name}'");
        match name {
            "quote" => return eval_quote(rest),
            "quasiquote" => {
                let operand = single_operand(rest, "quasiquote")?;
                return crate::quasiquote::expand_qq(operand, env, arena, 1);
            }
            "if" => return eval_if(rest, env, arena, depth),
            "lambda" => return eval_lambda(rest, env, arena),
            "define" => return eval_define(rest, env, arena, depth),
            "set!" => return eval_set(rest, env, arena, depth),
            "let" => return eval_let(rest, env, arena, depth),
            "begin" => return eval_sequence(rest, env, arena, depth + 1),
            "cond" => return eval_cond(rest, env, arena, depth),
            "and" => return eval_and(rest, env, arena, depth),
            "or" => return eval_or(rest, env, arena, depth),
            "defmacro" => return eval_defmacro(rest, env, arena),
            "unquote" | "unquote-splicing" => {
                return Err(L0Error::runtime_type_error(format!(
                    "{name} used outside quasiquote"
                )));
            }
            _ => {
                if let Some(transformer) = crate::macro_expand::macro_lookup(env, name)? {
                    let expanded = apply_macro_transformer(transformer, rest, arena, depth)?;
                    return eval_depth(expanded, env, arena, depth + 1);
                }
            }
        }
    }
    eval_application(head, rest, env, arena, depth)
}

fn eval_application<'arena>(
    head_expr: Value<'arena>,
    arg_exprs: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let callee = eval_depth(head_expr, env, arena, depth + 1)?;
    let args = eval_args(arg_exprs, env, arena, 0)?;
    apply(callee, args, env, arena, depth)
}

/// Applies an already-evaluated `callee` to an already-evaluated `args`
/// list.
pub fn apply<'arena>(
    callee: Value<'arena>,
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    match callee {
        Value::Primitive(record) => {
            l0_log::trace!("calling primitive '{}'", record.name);
            (record.func)(args, _env, arena)
        }
        Value::Closure(record) => apply_closure(arena, record, args, depth + 1),
        _ => Err(L0Error::runtime_type_error(
            "cannot apply a non-function value",
        )),
    }
}

fn eval_args<'arena>(
    arg_exprs: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    if depth > ARG_EVAL_DEPTH_LIMIT {
        return Err(L0Error::runtime_stack_overflow(
            "argument evaluation recursion depth exceeded",
        ));
    }
    match arg_exprs {
        Value::Nil => Ok(Value::Nil),
        Value::Pair(cell) => {
            let value = eval_depth(cell.car.get(), env, arena, 0)?;
            let rest = eval_args(cell.cdr.get(), env, arena, depth + 1)?;
            Ok(Value::cons(arena, value, rest))
        }
        _ => Err(L0Error::runtime_type_error(
            "argument list is not a proper list",
        )),
    }
}

pub(crate) fn apply_closure<'arena>(
    arena: &'arena Arena,
    record: &'arena ClosureRecord<'arena>,
    args: Value<'arena>,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let call_env = l0_env::extend(arena, record.env);
    bind_params(arena, call_env, record.params, args)?;
    eval_sequence(record.body, call_env, arena, depth + 1)
}

fn bind_params<'arena>(
    arena: &'arena Arena,
    call_env: Env<'arena>,
    params: Value<'arena>,
    args: Value<'arena>,
) -> L0Result<()> {
    let mut p = params;
    let mut a = args;
    loop {
        match (p, a) {
            (Value::Nil, Value::Nil) => return Ok(()),
            (Value::Pair(pc), Value::Pair(ac)) => {
                let name = match pc.car.get() {
                    Value::Symbol(s) => s,
                    _ => {
                        return Err(L0Error::runtime_type_error(
                            "parameter list must contain only symbols",
                        ));
                    }
                };
                l0_env::define(arena, call_env, name, ac.car.get())?;
                p = pc.cdr.get();
                a = ac.cdr.get();
            }
            _ => return Err(L0Error::runtime_arity("wrong number of arguments")),
        }
    }
}

pub(crate) fn eval_sequence<'arena>(
    body: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let mut result = Value::Nil;
    let mut current = body;
    loop {
        match current {
            Value::Nil => return Ok(result),
            Value::Pair(cell) => {
                result = eval_depth(cell.car.get(), env, arena, depth)?;
                current = cell.cdr.get();
            }
            _ => {
                return Err(L0Error::runtime_type_error(
                    "body is not a proper list of expressions",
                ));
            }
        }
    }
}

fn required_list<'arena>(value: Value<'arena>, context: &str) -> L0Result<Vec<Value<'arena>>> {
    value
        .list_to_vec()
        .ok_or_else(|| L0Error::runtime_type_error(format!("{context} must be a proper list")))
}

pub(crate) fn single_operand<'arena>(list: Value<'arena>, form: &str) -> L0Result<Value<'arena>> {
    match list {
        Value::Pair(cell) if cell.cdr.get().is_nil() => Ok(cell.car.get()),
        _ => Err(L0Error::runtime_arity(format!(
            "{form} expects exactly 1 operand"
        ))),
    }
}

fn eval_quote<'arena>(rest: Value<'arena>) -> L0Result<Value<'arena>> {
    single_operand(rest, "quote")
}

fn eval_if<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "if")?;
    let (test_expr, then_expr, else_expr) = match items.as_slice() {
        [c, t] => (*c, *t, None),
        [c, t, e] => (*c, *t, Some(*e)),
        _ => return Err(L0Error::runtime_arity("if expects 2 or 3 operands")),
    };
    let test = eval_depth(test_expr, env, arena, depth + 1)?;
    if test.is_truthy() {
        eval_depth(then_expr, env, arena, depth + 1)
    } else if let Some(else_expr) = else_expr {
        eval_depth(else_expr, env, arena, depth + 1)
    } else {
        Ok(Value::Nil)
    }
}

fn validate_param_list(params: Value<'_>) -> L0Result<()> {
    let items = required_list(params, "parameter list")?;
    for param in items {
        if !param.is_symbol() {
            return Err(L0Error::runtime_type_error("parameters must be symbols"));
        }
    }
    Ok(())
}

fn make_closure<'arena>(
    arena: &'arena Arena,
    env: Env<'arena>,
    params: Value<'arena>,
    body_items: &[Value<'arena>],
) -> L0Result<Value<'arena>> {
    validate_param_list(params)?;
    if body_items.is_empty() {
        return Err(L0Error::runtime_arity(
            "lambda expects at least one body expression",
        ));
    }
    let body = Value::list_from_iter(arena, body_items.iter().copied());
    Ok(Value::closure(arena, params, body, env))
}

fn eval_lambda<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "lambda")?;
    if items.is_empty() {
        return Err(L0Error::runtime_arity(
            "lambda expects a parameter list and at least one body expression",
        ));
    }
    make_closure(arena, env, items[0], &items[1..])
}

fn eval_define<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "define")?;
    if items.len() < 2 {
        return Err(L0Error::runtime_arity(
            "define expects a target and at least one expression",
        ));
    }
    match items[0] {
        Value::Symbol(name) => {
            if items.len() != 2 {
                return Err(L0Error::runtime_arity(
                    "define with a symbol target takes exactly one value expression",
                ));
            }
            let value = eval_depth(items[1], env, arena, depth + 1)?;
            l0_env::define(arena, env, name, value)?;
        }
        header @ Value::Pair(_) => {
            let header_items = required_list(header, "define function header")?;
            let name = match header_items.first() {
                Some(Value::Symbol(name)) => *name,
                _ => {
                    return Err(L0Error::runtime_type_error(
                        "define function header must start with a symbol",
                    ));
                }
            };
            let params = Value::list_from_iter(arena, header_items[1..].iter().copied());
            let closure = make_closure(arena, env, params, &items[1..])?;
            l0_env::define(arena, env, name, closure)?;
        }
        _ => {
            return Err(L0Error::runtime_type_error(
                "define target must be a symbol or a function header",
            ));
        }
    }
    Ok(Value::Nil)
}

fn eval_set<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "set!")?;
    let (name, value_expr) = match items.as_slice() {
        [Value::Symbol(name), value_expr] => (*name, *value_expr),
        [_, _] => return Err(L0Error::runtime_type_error("set! target must be a symbol")),
        _ => return Err(L0Error::runtime_arity("set! expects exactly 2 operands")),
    };
    let value = eval_depth(value_expr, env, arena, depth + 1)?;
    l0_env::set_bang(env, name, value)?;
    Ok(Value::Nil)
}

fn eval_let<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "let")?;
    if items.len() < 2 {
        return Err(L0Error::runtime_arity(
            "let expects a binding list and at least one body expression",
        ));
    }
    let bindings = required_list(items[0], "let bindings")?;
    let new_env = l0_env::extend(arena, env);
    for binding in bindings {
        let pair = required_list(binding, "let binding")?;
        let (name, value_expr) = match pair.as_slice() {
            [Value::Symbol(name), value_expr] => (*name, *value_expr),
            _ => {
                return Err(L0Error::runtime_type_error(
                    "let binding must be (symbol expr)",
                ));
            }
        };
        // Evaluated in the outer environment, so `(let ((x x)) ...)` reads
        // the outer `x` rather than an as-yet-unbound inner one.
        let value = eval_depth(value_expr, env, arena, depth + 1)?;
        l0_env::define(arena, new_env, name, value)?;
    }
    eval_sequence(
        Value::list_from_iter(arena, items[1..].iter().copied()),
        new_env,
        arena,
        depth + 1,
    )
}

fn eval_cond<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let clauses = required_list(rest, "cond")?;
    for (index, clause) in clauses.iter().enumerate() {
        let parts = required_list(*clause, "cond clause")?;
        let Some((test_slot, body)) = parts.split_first() else {
            return Err(L0Error::runtime_type_error(
                "cond clause must not be empty",
            ));
        };
        let is_else = test_slot.is_symbol_named("else");
        if is_else && index != clauses.len() - 1 {
            return Err(L0Error::runtime_type_error(
                "else clause must appear last in cond",
            ));
        }
        let test_value = if is_else {
            Value::Boolean(true)
        } else {
            eval_depth(*test_slot, env, arena, depth + 1)?
        };
        if test_value.is_truthy() {
            if body.is_empty() {
                return Ok(test_value);
            }
            return eval_sequence(
                Value::list_from_iter(arena, body.iter().copied()),
                env,
                arena,
                depth + 1,
            );
        }
    }
    Ok(Value::Nil)
}

fn eval_and<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "and")?;
    let mut result = Value::Boolean(true);
    for item in items {
        result = eval_depth(item, env, arena, depth + 1)?;
        if !result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_or<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "or")?;
    for item in items {
        let value = eval_depth(item, env, arena, depth + 1)?;
        if value.is_truthy() {
            return Ok(value);
        }
    }
    Ok(Value::Boolean(false))
}

fn eval_defmacro<'arena>(
    rest: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = required_list(rest, "defmacro")?;
    if items.len() < 3 {
        return Err(L0Error::runtime_arity(
            "defmacro expects a name, a parameter list, and at least one body expression",
        ));
    }
    let name = match items[0] {
        Value::Symbol(name) => name,
        _ => return Err(L0Error::runtime_type_error("defmacro name must be a symbol")),
    };
    let transformer = make_closure(arena, env, items[1], &items[2..])?;
    crate::macro_expand::register_macro(arena, env, name, transformer)?;
    Ok(Value::Nil)
}

pub(crate) fn apply_macro_transformer<'arena>(
    transformer: Value<'arena>,
    raw_args: Value<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    match transformer {
        Value::Closure(record) => apply_closure(arena, record, raw_args, depth + 1),
        _ => Err(L0Error::runtime_macro_malformed(
            "macro transformer is not a closure",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l0_syntax::Parser;

    fn run(source: &str, arena: &Arena) -> L0Result<Value<'_>> {
        let env = l0_env::create_global(arena).unwrap();
        let program = Parser::parse_string_all(source, arena).unwrap();
        eval(program.car().unwrap(), env, arena)
    }

    #[test]
    fn self_evaluating_atoms() {
        let arena = Arena::with_defaults();
        assert!(matches!(run("42", &arena), Ok(Value::Integer(42))));
        assert!(matches!(run("\"hi\"", &arena), Ok(Value::String("hi"))));
        assert!(matches!(run("#t", &arena), Ok(Value::Boolean(true))));
    }

    #[test]
    fn quote_returns_unevaluated_operand() {
        let arena = Arena::with_defaults();
        let result = run("(quote (a b c))", &arena).unwrap();
        assert!(result.is_list());
        assert_eq!(result.list_to_vec().unwrap().len(), 3);
    }

    #[test]
    fn if_picks_the_right_branch() {
        let arena = Arena::with_defaults();
        assert!(matches!(run("(if #t 1 2)", &arena), Ok(Value::Integer(1))));
        assert!(matches!(run("(if #f 1 2)", &arena), Ok(Value::Integer(2))));
        assert!(matches!(run("(if #f 1)", &arena), Ok(Value::Nil)));
    }

    #[test]
    fn define_and_set_mutate_global_env() {
        let arena = Arena::with_defaults();
        let result = run("(begin (define x 10) (set! x (+ x 1)) x)", &arena);
        // `+` is not defined in this test's env, so this exercises the
        // unbound-function error path instead of arithmetic.
        assert!(matches!(result, Err(L0Error::RuntimeUnbound { .. })));
    }

    #[test]
    fn define_function_header_desugars_to_lambda() {
        let arena = Arena::with_defaults();
        let env = l0_env::create_global(&arena).unwrap();
        let program = Parser::parse_string_all("(define (id x) x)", &arena).unwrap();
        eval(program.car().unwrap(), env, &arena).unwrap();
        assert!(matches!(l0_env::lookup(env, "id"), Ok(Value::Closure(_))));
    }

    #[test]
    fn let_binds_in_a_fresh_scope() {
        let arena = Arena::with_defaults();
        let result = run("(let ((x 1) (y 2)) x)", &arena);
        assert!(matches!(result, Ok(Value::Integer(1))));
    }

    #[test]
    fn cond_falls_through_to_else() {
        let arena = Arena::with_defaults();
        let result = run("(cond (#f 1) (else 2))", &arena);
        assert!(matches!(result, Ok(Value::Integer(2))));
    }

    #[test]
    fn and_or_short_circuit() {
        let arena = Arena::with_defaults();
        assert!(matches!(run("(and 1 #f 2)", &arena), Ok(Value::Boolean(false))));
        assert!(matches!(run("(or #f 3 4)", &arena), Ok(Value::Integer(3))));
    }

    #[test]
    fn lambda_application_binds_params() {
        let arena = Arena::with_defaults();
        let result = run("((lambda (x) x) 5)", &arena);
        assert!(matches!(result, Ok(Value::Integer(5))));
    }

    #[test]
    fn wrong_arity_application_is_an_error() {
        let arena = Arena::with_defaults();
        let result = run("((lambda (x y) x) 5)", &arena);
        assert!(matches!(result, Err(L0Error::RuntimeArity { .. })));
    }

    #[test]
    fn unquote_outside_quasiquote_is_an_error() {
        let arena = Arena::with_defaults();
        let result = run("(unquote 1)", &arena);
        assert!(matches!(result, Err(L0Error::RuntimeTypeError { .. })));
    }

    #[test]
    fn defmacro_prepends_to_the_macro_table() {
        let arena = Arena::with_defaults();
        let env = l0_env::create_global(&arena).unwrap();
        let program =
            Parser::parse_string_all("(defmacro twice (x) (list 'begin x x))", &arena).unwrap();
        eval(program.car().unwrap(), env, &arena).unwrap();
        let table = l0_env::lookup(env, "*macro-table*").unwrap();
        assert_eq!(table.list_to_vec().unwrap().len(), 1);
    }
}
