//! Syntax-directed AST → C translation (§4.9).

use crate::builder::StringBuilder;
use crate::names::{escape_c_string, primitive_c_symbol};
use l0_mem::Arena;
use l0_syntax::{L0Error, L0Result, Value};

const EMIT_DEPTH_LIMIT: usize = 100;

const PREAMBLE: &str = r#"#include "l0_arena.h"
#include "l0_types.h"
#include "l0_parser.h"
#include "l0_env.h"
#include "l0_primitives.h"
#include "l0_eval.h"

extern int l0_argc;
extern char **l0_argv;

int main(int argc, char **argv) {
    l0_argc = argc;
    l0_argv = argv;

    Arena *arena = l0_arena_create(4096);
    Value env = l0_env_create_global(arena);
    l0_register_primitives(env, arena);

    Value temp_result = l0_make_nil();
    int exit_code = 0;
"#;

const CHECK_BLOCK: &str = "    if (l0_is_null(temp_result) || l0_get_last_error_status() != L0_OK) {\n        l0_print_last_error();\n        exit_code = 1;\n        goto cleanup;\n    }\n";

const EPILOGUE: &str = "\ncleanup:\n    l0_arena_destroy(arena);\n    return exit_code;\n}\n";

fn check_depth(depth: usize) -> L0Result<()> {
    if depth > EMIT_DEPTH_LIMIT {
        Err(L0Error::runtime_stack_overflow(
            "C emitter recursion depth exceeded",
        ))
    } else {
        Ok(())
    }
}

fn required_list<'arena>(value: Value<'arena>, context: &str) -> L0Result<Vec<Value<'arena>>> {
    value
        .list_to_vec()
        .ok_or_else(|| L0Error::runtime_type_error(format!("{context} must be a proper list")))
}

fn single_operand<'arena>(list: Value<'arena>, form: &str) -> L0Result<Value<'arena>> {
    match list {
        Value::Pair(cell) if cell.cdr.get().is_nil() => Ok(cell.car.get()),
        _ => Err(L0Error::runtime_arity(format!(
            "{form} expects exactly 1 operand"
        ))),
    }
}

/// Translates the already macro-expanded top-level `forms` into a complete
/// C translation unit.
pub fn emit_program<'arena>(forms: &[Value<'arena>], arena: &'arena Arena) -> L0Result<String> {
    l0_log::debug!("emitting C translation unit for {} top-level form(s)", forms.len());
    let out = StringBuilder::init(arena, 4096);
    out.append_str(PREAMBLE);
    for (index, form) in forms.iter().enumerate() {
        l0_log::trace!("emitting top-level form {index}");
        out.append_str(&format!("\n    /* form {index} */\n"));
        if is_define(*form) {
            let rest = form.cdr().expect("is_define only matches pairs");
            let inner = emit_define_statements(rest, 0)?;
            out.append_str(&format!("    {{ {inner} }}\n    temp_result = l0_make_nil();\n"));
        } else {
            let expr_c = emit_expr(*form, 0)?;
            out.append_str(&format!("    temp_result = {expr_c};\n"));
        }
        out.append_str(CHECK_BLOCK);
    }
    out.append_str(EPILOGUE);
    Ok(out.finish())
}

fn is_define(form: Value<'_>) -> bool {
    matches!(form.car(), Some(head) if head.is_symbol_named("define"))
}

/// Emits a literal-data expression: `l0_make_*` calls building a pair tree,
/// with no `env` lookups — used both for self-evaluating atoms and for the
/// operand of `(quote x)`.
fn emit_literal(value: Value<'_>, depth: usize) -> L0Result<String> {
    check_depth(depth)?;
    match value {
        Value::Nil => Ok("l0_make_nil()".to_string()),
        Value::Boolean(b) => Ok(format!("l0_make_boolean({})", if b { "true" } else { "false" })),
        Value::Integer(i) => Ok(format!("l0_make_integer({i}LL)")),
        Value::Float(f) => Ok(format!("l0_make_float({f:?})")),
        Value::Symbol(s) => Ok(format!("l0_make_symbol(arena, \"{}\")", escape_c_string(s))),
        Value::String(s) => Ok(format!("l0_make_string(arena, \"{}\")", escape_c_string(s))),
        Value::Pair(cell) => {
            let car = emit_literal(cell.car.get(), depth + 1)?;
            let cdr = emit_literal(cell.cdr.get(), depth + 1)?;
            Ok(format!("l0_make_pair(arena, {car}, {cdr})"))
        }
        Value::Primitive(_) | Value::Closure(_) | Value::Reference(_) => Err(
            L0Error::runtime_type_error("cannot emit a runtime-only value as a C literal"),
        ),
    }
}

fn emit_literal_list(items: &[Value<'_>], depth: usize) -> L0Result<String> {
    check_depth(depth)?;
    match items.split_first() {
        None => Ok("l0_make_nil()".to_string()),
        Some((head, tail)) => {
            let head_c = emit_literal(*head, depth + 1)?;
            let tail_c = emit_literal_list(tail, depth + 1)?;
            Ok(format!("l0_make_pair(arena, {head_c}, {tail_c})"))
        }
    }
}

fn emit_expr(value: Value<'_>, depth: usize) -> L0Result<String> {
    check_depth(depth)?;
    match value {
        Value::Nil | Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {
            emit_literal(value, depth)
        }
        Value::Symbol(name) => Ok(format!(
            "l0_env_lookup(env, l0_make_symbol(arena, \"{}\"))",
            escape_c_string(name)
        )),
        Value::Pair(cell) => emit_pair(cell.car.get(), cell.cdr.get(), depth),
        Value::Primitive(_) | Value::Closure(_) | Value::Reference(_) => Err(
            L0Error::runtime_type_error("cannot translate a runtime-only value to C"),
        ),
    }
}

fn emit_pair(head: Value<'_>, rest: Value<'_>, depth: usize) -> L0Result<String> {
    if let Value::Symbol(name) = head {
        match name {
            "quote" => {
                let operand = single_operand(rest, "quote")?;
                return emit_literal(operand, depth + 1);
            }
            "if" => return emit_if(rest, depth),
            "begin" => return emit_begin(rest, depth),
            "lambda" => return emit_lambda(rest, depth),
            "define" => {
                let inner = emit_define_statements(rest, depth)?;
                return Ok(format!("({{ {inner} l0_make_nil(); }})"));
            }
            _ => {}
        }
        if let Some(symbol) = primitive_c_symbol(name) {
            let args = emit_arg_list(rest, depth + 1)?;
            return Ok(format!("{symbol}({args}, env, arena)"));
        }
    }
    let callee = emit_expr(head, depth + 1)?;
    let args = emit_arg_list(rest, depth + 1)?;
    Ok(format!("l0_apply({callee}, {args}, env, arena)"))
}

fn emit_arg_list(list: Value<'_>, depth: usize) -> L0Result<String> {
    check_depth(depth)?;
    match list {
        Value::Nil => Ok("l0_make_nil()".to_string()),
        Value::Pair(cell) => {
            let head = emit_expr(cell.car.get(), depth + 1)?;
            let tail = emit_arg_list(cell.cdr.get(), depth + 1)?;
            Ok(format!("l0_make_pair(arena, {head}, {tail})"))
        }
        _ => Err(L0Error::runtime_type_error(
            "argument list is not a proper list",
        )),
    }
}

fn emit_if(rest: Value<'_>, depth: usize) -> L0Result<String> {
    let items = required_list(rest, "if")?;
    let (cond, then_expr, else_expr) = match items.as_slice() {
        [c, t] => (*c, *t, None),
        [c, t, e] => (*c, *t, Some(*e)),
        _ => return Err(L0Error::runtime_arity("if expects 2 or 3 operands")),
    };
    let cond_c = emit_expr(cond, depth + 1)?;
    let then_c = emit_expr(then_expr, depth + 1)?;
    let else_c = match else_expr {
        Some(e) => emit_expr(e, depth + 1)?,
        None => "l0_make_nil()".to_string(),
    };
    Ok(format!(
        "({{ Value l0_if_result; if (l0_is_truthy({cond_c})) {{ l0_if_result = {then_c}; }} else {{ l0_if_result = {else_c}; }} l0_if_result; }})"
    ))
}

fn emit_begin(rest: Value<'_>, depth: usize) -> L0Result<String> {
    let items = required_list(rest, "begin")?;
    if items.is_empty() {
        return Ok("l0_make_nil()".to_string());
    }
    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        parts.push(emit_expr(item, depth + 1)?);
    }
    Ok(format!("({})", parts.join(", ")))
}

fn emit_lambda(rest: Value<'_>, depth: usize) -> L0Result<String> {
    let items = required_list(rest, "lambda")?;
    if items.is_empty() {
        return Err(L0Error::runtime_arity(
            "lambda expects a parameter list and at least one body expression",
        ));
    }
    let params_c = emit_literal(items[0], depth + 1)?;
    let body_c = emit_literal_list(&items[1..], depth + 1)?;
    Ok(format!("l0_make_closure(arena, {params_c}, {body_c}, env)"))
}

fn emit_define_statements(rest: Value<'_>, depth: usize) -> L0Result<String> {
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
            let value_c = emit_expr(items[1], depth + 1)?;
            Ok(format!(
                "Value l0_define_val = {value_c}; l0_env_define(env, l0_make_symbol(arena, \"{}\"), l0_define_val);",
                escape_c_string(name)
            ))
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
            let params_c = emit_literal_list(&header_items[1..], depth + 1)?;
            let body_c = emit_literal_list(&items[1..], depth + 1)?;
            Ok(format!(
                "Value l0_define_val = l0_make_closure(arena, {params_c}, {body_c}, env); l0_env_define(env, l0_make_symbol(arena, \"{}\"), l0_define_val);",
                escape_c_string(name)
            ))
        }
        _ => Err(L0Error::runtime_type_error(
            "define target must be a symbol or a function header",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l0_syntax::Parser;

    fn forms<'a>(source: &str, arena: &'a Arena) -> Vec<Value<'a>> {
        Parser::parse_string_all(source, arena)
            .unwrap()
            .list_to_vec()
            .unwrap()
    }

    #[test]
    fn preamble_and_epilogue_frame_every_program() {
        let arena = Arena::with_defaults();
        let program = forms("42", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.starts_with("#include \"l0_arena.h\""));
        assert!(c_source.trim_end().ends_with('}'));
        assert!(c_source.contains("int main(int argc, char **argv)"));
    }

    #[test]
    fn integer_literal_becomes_make_integer_call() {
        let arena = Arena::with_defaults();
        let program = forms("42", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_make_integer(42LL)"));
    }

    #[test]
    fn quoted_list_emits_a_pair_chain() {
        let arena = Arena::with_defaults();
        let program = forms("(quote (1 2))", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_make_pair(arena, l0_make_integer(1LL), l0_make_pair(arena, l0_make_integer(2LL), l0_make_nil()))"));
    }

    #[test]
    fn known_primitive_call_uses_its_direct_c_symbol() {
        let arena = Arena::with_defaults();
        let program = forms("(+ 1 2)", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_prim_add("));
    }

    #[test]
    fn unknown_call_falls_back_to_generic_apply() {
        let arena = Arena::with_defaults();
        let program = forms("(my-func 1)", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_apply("));
    }

    #[test]
    fn symbol_reference_emits_an_env_lookup() {
        let arena = Arena::with_defaults();
        let program = forms("x", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_env_lookup(env, l0_make_symbol(arena, \"x\"))"));
    }

    #[test]
    fn define_emits_a_scoped_block_and_resets_temp_result_to_nil() {
        let arena = Arena::with_defaults();
        let program = forms("(define x 10)", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_env_define(env, l0_make_symbol(arena, \"x\")"));
        assert!(c_source.contains("temp_result = l0_make_nil();"));
    }

    #[test]
    fn define_function_header_builds_a_closure() {
        let arena = Arena::with_defaults();
        let program = forms("(define (f x) x)", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_make_closure(arena,"));
    }

    #[test]
    fn if_emits_a_statement_expression() {
        let arena = Arena::with_defaults();
        let program = forms("(if #t 1 2)", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_if_result"));
    }

    #[test]
    fn string_literal_escapes_embedded_quotes() {
        let arena = Arena::with_defaults();
        let program = forms("\"a\\\"b\"", &arena);
        let c_source = emit_program(&program, &arena).unwrap();
        assert!(c_source.contains("l0_make_string(arena, \"a\\\"b\")"));
    }

    #[test]
    fn deeply_nested_expression_trips_the_depth_guard() {
        let mut source = String::from("1");
        for _ in 0..150 {
            source = format!("(+ {source} 1)");
        }
        let arena = Arena::with_defaults();
        let program = forms(&source, &arena);
        let result = emit_program(&program, &arena);
        assert!(matches!(result, Err(L0Error::RuntimeStackOverflow { .. })));
    }
}
