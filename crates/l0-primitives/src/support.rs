//! Argument-list and type-coercion helpers shared by every primitive.

use l0_syntax::{L0Error, L0Result, Value};

pub(crate) fn args_vec<'arena>(args: Value<'arena>, name: &str) -> L0Result<Vec<Value<'arena>>> {
    args.list_to_vec()
        .ok_or_else(|| L0Error::runtime_type_error(format!("{name}: argument list is not a proper list")))
}

pub(crate) fn exact_arity<T>(items: &[T], name: &str, n: usize) -> L0Result<()> {
    if items.len() == n {
        Ok(())
    } else {
        Err(L0Error::runtime_arity(format!(
            "{name} expects exactly {n} argument(s), got {}",
            items.len()
        )))
    }
}

pub(crate) fn min_arity<T>(items: &[T], name: &str, n: usize) -> L0Result<()> {
    if items.len() >= n {
        Ok(())
    } else {
        Err(L0Error::runtime_arity(format!(
            "{name} expects at least {n} argument(s), got {}",
            items.len()
        )))
    }
}

#[derive(Clone, Copy)]
pub(crate) enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Number::Integer(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

pub(crate) fn as_number(value: Value<'_>, name: &str) -> L0Result<Number> {
    match value {
        Value::Integer(i) => Ok(Number::Integer(i)),
        Value::Float(f) => Ok(Number::Float(f)),
        _ => Err(L0Error::runtime_type_error(format!(
            "{name}: expected a number"
        ))),
    }
}

pub(crate) fn as_string<'arena>(value: Value<'arena>, name: &str) -> L0Result<&'arena str> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(L0Error::runtime_type_error(format!(
            "{name}: expected a string"
        ))),
    }
}

pub(crate) fn as_symbol<'arena>(value: Value<'arena>, name: &str) -> L0Result<&'arena str> {
    match value {
        Value::Symbol(s) => Ok(s),
        _ => Err(L0Error::runtime_type_error(format!(
            "{name}: expected a symbol"
        ))),
    }
}

pub(crate) fn as_integer(value: Value<'_>, name: &str) -> L0Result<i64> {
    match value {
        Value::Integer(i) => Ok(i),
        _ => Err(L0Error::runtime_type_error(format!(
            "{name}: expected an integer"
        ))),
    }
}
