//! Reflective execution and macro-table introspection primitives.
//!
//! `is-macro?` and `get-macro-transformer` take the macro table itself as
//! an explicit argument (an L0 program fetches it via the
//! `*macro-table*` global first) rather than reaching into `env` for it —
//! keeping with this codebase's rule of threading state through
//! parameters instead of through ambient globals.

use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};

use crate::support::{args_vec, as_symbol, exact_arity};

pub(crate) fn eval<'arena>(
    args: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "eval")?;
    exact_arity(&items, "eval", 1)?;
    l0_eval::eval(items[0], env, arena)
}

pub(crate) fn apply<'arena>(
    args: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "apply")?;
    exact_arity(&items, "apply", 2)?;
    items[1]
        .list_to_vec()
        .ok_or_else(|| L0Error::runtime_type_error("apply: second argument must be a proper list"))?;
    l0_eval::apply(items[0], items[1], env, arena, 0)
}

/// The root of `env`'s outer chain: the environment that holds
/// `*macro-table*`, `*c-declarations*`, and friends.
fn compiler_env<'arena>(env: Env<'arena>) -> Env<'arena> {
    let mut current = env;
    while let Some(outer) = current.outer() {
        current = outer;
    }
    current
}

pub(crate) fn eval_in_compiler_env<'arena>(
    args: Value<'arena>,
    env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "eval-in-compiler-env")?;
    exact_arity(&items, "eval-in-compiler-env", 1)?;
    l0_eval::eval(items[0], compiler_env(env), arena)
}

fn macro_table_lookup<'arena>(
    table: Value<'arena>,
    name: &str,
) -> L0Result<Option<Value<'arena>>> {
    let mut node = table;
    loop {
        match node {
            Value::Nil => return Ok(None),
            Value::Pair(cell) => {
                let entry = cell.car.get();
                let entry_name = entry
                    .car()
                    .ok_or_else(|| L0Error::runtime_macro_malformed("macro table entry is not a pair"))?;
                if entry_name.is_symbol_named(name) {
                    let transformer = entry.cdr().ok_or_else(|| {
                        L0Error::runtime_macro_malformed("macro table entry is not a pair")
                    })?;
                    return Ok(Some(transformer));
                }
                node = cell.cdr.get();
            }
            _ => return Err(L0Error::runtime_macro_malformed("macro table is not a proper list")),
        }
    }
}

pub(crate) fn is_macro<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "is-macro?")?;
    exact_arity(&items, "is-macro?", 2)?;
    let name = as_symbol(items[1], "is-macro?")?;
    Ok(Value::Boolean(macro_table_lookup(items[0], name)?.is_some()))
}

pub(crate) fn get_macro_transformer<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "get-macro-transformer")?;
    exact_arity(&items, "get-macro-transformer", 2)?;
    let name = as_symbol(items[1], "get-macro-transformer")?;
    Ok(macro_table_lookup(items[0], name)?.unwrap_or(Value::Boolean(false)))
}
