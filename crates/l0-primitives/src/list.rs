//! Pair and list primitives: `cons`, `car`, `cdr`, `pair?`, `null?`, `list`,
//! `append`, plus `ref`/`deref` (§9's groundwork-for-a-borrow-checker
//! `Reference` variant).

use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};

use crate::support::{args_vec, exact_arity};

pub(crate) fn cons<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "cons")?;
    exact_arity(&items, "cons", 2)?;
    Ok(Value::cons(arena, items[0], items[1]))
}

pub(crate) fn car<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "car")?;
    exact_arity(&items, "car", 1)?;
    items[0]
        .car()
        .ok_or_else(|| L0Error::runtime_type_error("car: expected a pair"))
}

pub(crate) fn cdr<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "cdr")?;
    exact_arity(&items, "cdr", 1)?;
    items[0]
        .cdr()
        .ok_or_else(|| L0Error::runtime_type_error("cdr: expected a pair"))
}

pub(crate) fn is_pair<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "pair?")?;
    exact_arity(&items, "pair?", 1)?;
    Ok(Value::Boolean(items[0].is_pair()))
}

pub(crate) fn is_null<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "null?")?;
    exact_arity(&items, "null?", 1)?;
    Ok(Value::Boolean(items[0].is_nil()))
}

pub(crate) fn list<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    // Already a proper list of the evaluated operands; `list` just hands
    // it back as the result.
    args_vec(args, "list")?;
    Ok(args)
}

pub(crate) fn append<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let lists = args_vec(args, "append")?;
    let Some((last, init)) = lists.split_last() else {
        return Ok(Value::Nil);
    };
    let mut result = *last;
    for list in init.iter().rev() {
        let items = list
            .list_to_vec()
            .ok_or_else(|| L0Error::runtime_type_error("append: every argument but the last must be a proper list"))?;
        for item in items.into_iter().rev() {
            result = Value::cons(arena, item, result);
        }
    }
    Ok(result)
}

pub(crate) fn make_reference<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "ref")?;
    exact_arity(&items, "ref", 1)?;
    Ok(Value::reference(arena, items[0]))
}

pub(crate) fn deref<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "deref")?;
    exact_arity(&items, "deref", 1)?;
    match items[0] {
        Value::Reference(cell) => Ok(cell.get()),
        _ => Err(L0Error::runtime_type_error("deref: expected a reference")),
    }
}
