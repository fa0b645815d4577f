//! Quasiquote template expansion: `` `x ``, `,x`, and `,@x`.
//!
//! `depth` starts at 1 for the outermost quasiquote and increments on each
//! nested quasiquote; `unquote`/`unquote-splicing` only evaluate their
//! operand once `depth` unwinds back to 1, otherwise they're rebuilt
//! literally with the inner template expanded at `depth - 1`.

use crate::eval::eval;
use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};

/// Expands `template` at nesting `depth` (the outermost call uses `depth == 1`).
pub fn expand_qq<'arena>(
    template: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    let Value::Pair(cell) = template else {
        return Ok(template);
    };
    let head = cell.car.get();
    if head.is_symbol_named("unquote") {
        let operand = single_operand(cell.cdr.get(), "unquote")?;
        return if depth == 1 {
            l0_log::trace!("evaluating unquote at depth 1");
            eval(operand, env, arena)
        } else {
            let inner = expand_qq(operand, env, arena, depth - 1)?;
            Ok(wrap(arena, "unquote", inner))
        };
    }
    if head.is_symbol_named("quasiquote") {
        let operand = single_operand(cell.cdr.get(), "quasiquote")?;
        let inner = expand_qq(operand, env, arena, depth + 1)?;
        return Ok(wrap(arena, "quasiquote", inner));
    }
    expand_qq_list(template, env, arena, depth)
}

fn expand_qq_list<'arena>(
    list: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    match list {
        Value::Pair(cell) => {
            let element = cell.car.get();
            if is_unquote_splicing_form(element) {
                let operand = single_operand(element.cdr().unwrap(), "unquote-splicing")?;
                if depth == 1 {
                    let spliced = eval(operand, env, arena)?;
                    let rest = expand_qq_list(cell.cdr.get(), env, arena, depth)?;
                    return append(arena, spliced, rest);
                }
                let inner = expand_qq(operand, env, arena, depth - 1)?;
                let rest = expand_qq_list(cell.cdr.get(), env, arena, depth)?;
                return Ok(Value::cons(arena, wrap(arena, "unquote-splicing", inner), rest));
            }
            let expanded_element = expand_qq(element, env, arena, depth)?;
            let rest = expand_qq_list(cell.cdr.get(), env, arena, depth)?;
            Ok(Value::cons(arena, expanded_element, rest))
        }
        other => expand_qq(other, env, arena, depth),
    }
}

fn is_unquote_splicing_form(value: Value<'_>) -> bool {
    matches!(value.car(), Some(head) if head.is_symbol_named("unquote-splicing"))
}

fn single_operand<'arena>(list: Value<'arena>, form: &str) -> L0Result<Value<'arena>> {
    match list {
        Value::Pair(cell) if cell.cdr.get().is_nil() => Ok(cell.car.get()),
        _ => Err(L0Error::runtime_arity(format!(
            "{form} expects exactly 1 operand"
        ))),
    }
}

fn wrap<'arena>(arena: &'arena Arena, head: &str, operand: Value<'arena>) -> Value<'arena> {
    let head = Value::symbol(arena, head);
    Value::cons(arena, head, Value::cons(arena, operand, Value::Nil))
}

/// `append`-style splice: conses every element of `a` onto `b`. Kept local
/// rather than reusing the `append` primitive, since that would require
/// `l0-eval` to depend on `l0-primitives` (which depends on `l0-eval`).
fn append<'arena>(arena: &'arena Arena, a: Value<'arena>, b: Value<'arena>) -> L0Result<Value<'arena>> {
    match a {
        Value::Nil => Ok(b),
        Value::Pair(cell) => {
            let rest = append(arena, cell.cdr.get(), b)?;
            Ok(Value::cons(arena, cell.car.get(), rest))
        }
        _ => Err(L0Error::runtime_type_error(
            "unquote-splicing operand must evaluate to a proper list",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l0_syntax::Parser;

    fn expand(source: &str) -> L0Result<String> {
        let arena = Arena::with_defaults();
        let env = l0_env::create_global(&arena).unwrap();
        let program = Parser::parse_string_all(source, &arena).unwrap();
        let result = eval(program.car().unwrap(), env, &arena)?;
        Ok(l0_syntax::unparse(&result))
    }

    #[test]
    fn unquoted_literal_list_passes_through() {
        assert_eq!(expand("`(1 2 3)").unwrap(), "(1 2 3)");
    }

    #[test]
    fn unquote_evaluates_a_bound_variable() {
        let arena = Arena::with_defaults();
        let env = l0_env::create_global(&arena).unwrap();
        let setup = Parser::parse_string_all("(define n 2)", &arena).unwrap();
        eval(setup.car().unwrap(), env, &arena).unwrap();
        let program = Parser::parse_string_all("`(1 ,n 3)", &arena).unwrap();
        let result = eval(program.car().unwrap(), env, &arena).unwrap();
        assert_eq!(l0_syntax::unparse(&result), "(1 2 3)");
    }

    #[test]
    fn unquote_substitutes_a_quoted_value() {
        assert_eq!(expand("`(a ,(quote b) c)").unwrap(), "(a b c)");
    }

    #[test]
    fn unquote_splicing_flattens_a_list_into_the_template() {
        assert_eq!(
            expand("`(1 ,@(quote (2 3)) 4)").unwrap(),
            "(1 2 3 4)"
        );
    }

    #[test]
    fn nested_quasiquote_defers_inner_unquote() {
        let arena = Arena::with_defaults();
        let env = l0_env::create_global(&arena).unwrap();
        let program = Parser::parse_string_all("``(a ,(b ,(quote c)))", &arena).unwrap();
        let result = eval(program.car().unwrap(), env, &arena).unwrap();
        let text = l0_syntax::unparse(&result);
        assert_eq!(text, "(quasiquote (a (unquote (b c))))");
    }

    #[test]
    fn unquote_splicing_operand_must_be_a_list() {
        let result = expand("`(1 ,@2)");
        assert!(matches!(result, Err(L0Error::RuntimeTypeError { .. })));
    }
}
