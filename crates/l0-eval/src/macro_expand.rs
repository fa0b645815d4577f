//! `*macro-table*` maintenance and the full-tree macro-expansion pass used
//! by the code generator ahead of emission.

use crate::eval::apply_macro_transformer;
use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};

const MACROEXPAND_DEPTH_LIMIT: usize = 500;

/// Prepends `(name . transformer)` to the global `*macro-table*`.
pub(crate) fn register_macro<'arena>(
    arena: &'arena Arena,
    env: Env<'arena>,
    name: &str,
    transformer: Value<'arena>,
) -> L0Result<()> {
    let current_table = l0_env::lookup(env, "*macro-table*")?;
    let name_symbol = Value::symbol(arena, name);
    let entry = Value::cons(arena, name_symbol, transformer);
    let new_table = Value::cons(arena, entry, current_table);
    l0_env::set_bang(env, "*macro-table*", new_table)
}

/// Looks up `name` in the global `*macro-table*`. Returns `Ok(None)` rather
/// than erroring when no table is bound yet, so `eval`/`macroexpand` work
/// against an environment that was never run through `l0_env::create_global`
/// (useful in isolated tests).
pub(crate) fn macro_lookup<'arena>(
    env: Env<'arena>,
    name: &str,
) -> L0Result<Option<Value<'arena>>> {
    let table = match l0_env::lookup(env, "*macro-table*") {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };
    let mut current = table;
    loop {
        match current {
            Value::Nil => return Ok(None),
            Value::Pair(cell) => {
                match cell.car.get() {
                    Value::Pair(entry) => {
                        if entry.car.get().is_symbol_named(name) {
                            return Ok(Some(entry.cdr.get()));
                        }
                    }
                    _ => {
                        return Err(L0Error::runtime_macro_malformed(
                            "macro table entry is not a (name . transformer) pair",
                        ));
                    }
                }
                current = cell.cdr.get();
            }
            _ => {
                return Err(L0Error::runtime_macro_malformed(
                    "*macro-table* is not a proper list",
                ));
            }
        }
    }
}

/// Expands every macro call reachable from `expr`, recursively, leaving
/// `quote`d subtrees untouched.
pub fn macroexpand<'arena>(
    expr: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    macroexpand_depth(expr, env, arena, 0)
}

fn macroexpand_depth<'arena>(
    expr: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
    depth: usize,
) -> L0Result<Value<'arena>> {
    if depth > MACROEXPAND_DEPTH_LIMIT {
        return Err(L0Error::runtime_stack_overflow(
            "macro expansion recursion depth exceeded",
        ));
    }
    let Value::Pair(cell) = expr else {
        return Ok(expr);
    };
    let head = cell.car.get();
    if head.is_symbol_named("quote") {
        return Ok(expr);
    }
    if let Value::Symbol(name) = head {
        if let Some(transformer) = macro_lookup(env, name)? {
            l0_log::debug!("expanding macro call '{name}'");
            let expanded = apply_macro_transformer(transformer, cell.cdr.get(), arena, depth)?;
            return macroexpand_depth(expanded, env, arena, depth + 1);
        }
    }
    let car = macroexpand_depth(head, env, arena, depth + 1)?;
    let cdr = macroexpand_depth(cell.cdr.get(), env, arena, depth + 1)?;
    if value_same(car, head) && value_same(cdr, cell.cdr.get()) {
        Ok(expr)
    } else {
        Ok(Value::cons(arena, car, cdr))
    }
}

fn value_same<'arena>(a: Value<'arena>, b: Value<'arena>) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        (Value::Symbol(x), Value::Symbol(y)) | (Value::String(x), Value::String(y)) => {
            std::ptr::eq(x, y)
        }
        (Value::Pair(x), Value::Pair(y)) => std::ptr::eq(x, y),
        (Value::Primitive(x), Value::Primitive(y)) => std::ptr::eq(x, y),
        (Value::Closure(x), Value::Closure(y)) => std::ptr::eq(x, y),
        (Value::Reference(x), Value::Reference(y)) => std::ptr::eq(x, y),
        _ => false,
    }
}
