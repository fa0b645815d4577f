//! String primitives and `print`.

use l0_mem::Arena;
use l0_syntax::{unparse, Env, L0Error, L0Result, Value};

use crate::support::{args_vec, as_integer, as_string, as_symbol, exact_arity, min_arity};

pub(crate) fn string_append<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "string-append")?;
    let mut joined = String::new();
    for item in items {
        joined.push_str(as_string(item, "string-append")?);
    }
    Ok(Value::string(arena, &joined))
}

pub(crate) fn string_to_symbol<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "string->symbol")?;
    exact_arity(&items, "string->symbol", 1)?;
    Ok(Value::symbol(arena, as_string(items[0], "string->symbol")?))
}

pub(crate) fn symbol_to_string<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "symbol->string")?;
    exact_arity(&items, "symbol->string", 1)?;
    Ok(Value::string(arena, as_symbol(items[0], "symbol->string")?))
}

pub(crate) fn string_length<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "string-length")?;
    exact_arity(&items, "string-length", 1)?;
    let text = as_string(items[0], "string-length")?;
    Ok(Value::Integer(text.chars().count() as i64))
}

pub(crate) fn string_ref<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "string-ref")?;
    exact_arity(&items, "string-ref", 2)?;
    let text = as_string(items[0], "string-ref")?;
    let index = as_integer(items[1], "string-ref")?;
    let ch = usize::try_from(index)
        .ok()
        .and_then(|i| text.chars().nth(i))
        .ok_or_else(|| L0Error::runtime_type_error("string-ref: index out of bounds"))?;
    Ok(Value::string(arena, &ch.to_string()))
}

pub(crate) fn substring<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "substring")?;
    exact_arity(&items, "substring", 3)?;
    let text = as_string(items[0], "substring")?;
    let start = as_integer(items[1], "substring")?;
    let end = as_integer(items[2], "substring")?;
    if start < 0 || end < start {
        return Err(L0Error::runtime_type_error(
            "substring: invalid start/end range",
        ));
    }
    let chars: Vec<char> = text.chars().collect();
    let (start, end) = (start as usize, end as usize);
    if end > chars.len() {
        return Err(L0Error::runtime_type_error(
            "substring: range exceeds string length",
        ));
    }
    let slice: String = chars[start..end].iter().collect();
    Ok(Value::string(arena, &slice))
}

pub(crate) fn number_to_string<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "number->string")?;
    exact_arity(&items, "number->string", 1)?;
    let text = match items[0] {
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        _ => {
            return Err(L0Error::runtime_type_error(
                "number->string: expected a number",
            ));
        }
    };
    Ok(Value::string(arena, &text))
}

pub(crate) fn print<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "print")?;
    min_arity(&items, "print", 0)?;
    let rendered = items
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{rendered}");
    Ok(Value::Boolean(true))
}

fn display_value(value: &Value<'_>) -> String {
    match value {
        Value::String(s) => (*s).to_string(),
        other => unparse(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l0_mem::Arena;

    fn call<'a>(f: l0_syntax::PrimitiveFn<'a>, args: Vec<Value<'a>>, arena: &'a Arena) -> L0Result<Value<'a>> {
        let env = l0_env::create(arena, None);
        f(Value::list_from_iter(arena, args.into_iter()), env, arena)
    }

    #[test]
    fn string_append_concatenates() {
        let arena = Arena::with_defaults();
        let result = call(
            string_append,
            vec![Value::string(&arena, "foo"), Value::string(&arena, "bar")],
            &arena,
        )
        .unwrap();
        assert!(matches!(result, Value::String("foobar")));
    }

    #[test]
    fn string_ref_out_of_bounds_is_an_error() {
        let arena = Arena::with_defaults();
        let result = call(string_ref, vec![Value::string(&arena, "hi"), Value::Integer(5)], &arena);
        assert!(result.is_err());
    }

    #[test]
    fn substring_extracts_a_range() {
        let arena = Arena::with_defaults();
        let result = call(
            substring,
            vec![Value::string(&arena, "hello"), Value::Integer(1), Value::Integer(3)],
            &arena,
        )
        .unwrap();
        assert!(matches!(result, Value::String("el")));
    }

    #[test]
    fn number_to_string_handles_both_numeric_kinds() {
        let arena = Arena::with_defaults();
        assert!(matches!(call(number_to_string, vec![Value::Integer(42)], &arena), Ok(Value::String("42"))));
    }
}
