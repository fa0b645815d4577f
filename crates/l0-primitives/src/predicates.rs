//! Single-argument type predicates, plus `not`.

use l0_mem::Arena;
use l0_syntax::{Env, L0Result, Value};

use crate::support::{args_vec, exact_arity};

macro_rules! predicate {
    ($fn_name:ident, $prim_name:literal, $test:expr) => {
        pub(crate) fn $fn_name<'arena>(
            args: Value<'arena>,
            _env: Env<'arena>,
            _arena: &'arena Arena,
        ) -> L0Result<Value<'arena>> {
            let items = args_vec(args, $prim_name)?;
            exact_arity(&items, $prim_name, 1)?;
            let test: fn(&Value<'arena>) -> bool = $test;
            Ok(Value::Boolean(test(&items[0])))
        }
    };
}

predicate!(is_integer, "integer?", Value::is_integer);
predicate!(is_boolean, "boolean?", Value::is_boolean);
predicate!(is_symbol, "symbol?", Value::is_symbol);
predicate!(is_string, "string?", Value::is_string);
predicate!(is_float, "float?", Value::is_float);
predicate!(is_closure, "closure?", Value::is_closure);

pub(crate) fn not<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "not")?;
    exact_arity(&items, "not", 1)?;
    Ok(Value::Boolean(!items[0].is_truthy()))
}
