//! Numeric primitives: `+`, `-`, `*`, `/`, `=`, `<`, `>`.
//!
//! Mixed integer/float operands promote to float; `/` always returns a
//! float, matching the concrete scenario table (`(+ 1 2.0)` → `Float 3.0`,
//! `(/ 1 0)` → `RuntimeDivisionByZero`).

use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};

use crate::support::{args_vec, as_number, min_arity, Number};

fn numbers<'arena>(args: Value<'arena>, name: &str) -> L0Result<Vec<Number>> {
    args_vec(args, name)?
        .into_iter()
        .map(|v| as_number(v, name))
        .collect()
}

pub(crate) fn add<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let nums = numbers(args, "+")?;
    if nums.iter().any(|n| matches!(n, Number::Float(_))) {
        Ok(Value::Float(nums.iter().map(|n| n.as_f64()).sum()))
    } else {
        let mut total: i64 = 0;
        for n in nums {
            if let Number::Integer(i) = n {
                total += i;
            }
        }
        Ok(Value::Integer(total))
    }
}

pub(crate) fn sub<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let nums = numbers(args, "-")?;
    min_arity(&nums, "-", 1)?;
    let is_float = nums.iter().any(|n| matches!(n, Number::Float(_)));
    if nums.len() == 1 {
        return Ok(if is_float {
            Value::Float(-nums[0].as_f64())
        } else {
            match nums[0] {
                Number::Integer(i) => Value::Integer(-i),
                Number::Float(_) => unreachable!(),
            }
        });
    }
    if is_float {
        let mut result = nums[0].as_f64();
        for n in &nums[1..] {
            result -= n.as_f64();
        }
        Ok(Value::Float(result))
    } else {
        let mut result = match nums[0] {
            Number::Integer(i) => i,
            Number::Float(_) => unreachable!(),
        };
        for n in &nums[1..] {
            if let Number::Integer(i) = n {
                result -= i;
            }
        }
        Ok(Value::Integer(result))
    }
}

pub(crate) fn mul<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let nums = numbers(args, "*")?;
    if nums.iter().any(|n| matches!(n, Number::Float(_))) {
        Ok(Value::Float(nums.iter().map(|n| n.as_f64()).product()))
    } else {
        let mut total: i64 = 1;
        for n in nums {
            if let Number::Integer(i) = n {
                total *= i;
            }
        }
        Ok(Value::Integer(total))
    }
}

pub(crate) fn div<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let nums = numbers(args, "/")?;
    min_arity(&nums, "/", 1)?;
    let (first, rest) = nums.split_first().expect("min_arity checked non-empty");
    if rest.is_empty() {
        if first.is_zero() {
            return Err(L0Error::runtime_division_by_zero("/: division by zero"));
        }
        return Ok(Value::Float(1.0 / first.as_f64()));
    }
    let mut result = first.as_f64();
    for n in rest {
        if n.is_zero() {
            return Err(L0Error::runtime_division_by_zero("/: division by zero"));
        }
        result /= n.as_f64();
    }
    Ok(Value::Float(result))
}

fn chained_compare<'arena>(
    args: Value<'arena>,
    name: &str,
    cmp: fn(f64, f64) -> bool,
) -> L0Result<Value<'arena>> {
    let nums = numbers(args, name)?;
    min_arity(&nums, name, 2)?;
    let ok = nums.windows(2).all(|pair| cmp(pair[0].as_f64(), pair[1].as_f64()));
    Ok(Value::Boolean(ok))
}

pub(crate) fn num_eq<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    chained_compare(args, "=", |a, b| a == b)
}

pub(crate) fn num_lt<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    chained_compare(args, "<", |a, b| a < b)
}

pub(crate) fn num_gt<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    chained_compare(args, ">", |a, b| a > b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use l0_mem::Arena;

    fn call<'a>(f: l0_syntax::PrimitiveFn<'a>, nums: Vec<Value<'a>>, arena: &'a Arena) -> L0Result<Value<'a>> {
        let env = l0_env::create(arena, None);
        f(Value::list_from_iter(arena, nums.into_iter()), env, arena)
    }

    #[test]
    fn add_stays_integer_when_all_operands_are_integers() {
        let arena = Arena::with_defaults();
        let result = call(add, vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)], &arena).unwrap();
        assert!(matches!(result, Value::Integer(6)));
    }

    #[test]
    fn add_promotes_to_float_with_a_float_operand() {
        let arena = Arena::with_defaults();
        let result = call(add, vec![Value::Integer(1), Value::Float(2.0)], &arena).unwrap();
        assert!(matches!(result, Value::Float(f) if f == 3.0));
    }

    #[test]
    fn div_always_returns_a_float() {
        let arena = Arena::with_defaults();
        let result = call(div, vec![Value::Integer(6), Value::Integer(3)], &arena).unwrap();
        assert!(matches!(result, Value::Float(f) if f == 2.0));
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let arena = Arena::with_defaults();
        let result = call(div, vec![Value::Integer(1), Value::Integer(0)], &arena);
        assert!(matches!(result, Err(L0Error::RuntimeDivisionByZero { .. })));
    }

    #[test]
    fn chained_comparison_requires_every_adjacent_pair_to_hold() {
        let arena = Arena::with_defaults();
        let result = call(num_lt, vec![Value::Integer(1), Value::Integer(2), Value::Integer(2)], &arena).unwrap();
        assert!(matches!(result, Value::Boolean(false)));
    }
}
