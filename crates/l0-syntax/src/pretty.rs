//! Writes a `Value` back out as L0 surface syntax.
//!
//! Used for parse/print round-tripping and for rendering quoted data
//! (e.g. in macro-expansion error messages). Reader-macro sugar is not
//! reconstructed — `(quote x)` prints as `(quote x)`, not `'x` — so
//! round-tripping is exact modulo that desugaring and whitespace, matching
//! the parser's own reader-macro expansion.

use crate::value::Value;
use std::fmt::Write as _;

/// Renders `value` as L0 source text.
#[must_use]
pub fn unparse(value: &Value<'_>) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value<'_>, out: &mut String) {
    match value {
        Value::Nil => out.push_str("()"),
        Value::Boolean(true) => out.push_str("#t"),
        Value::Boolean(false) => out.push_str("#f"),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Symbol(s) => out.push_str(s),
        Value::String(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    other => out.push(other),
                }
            }
            out.push('"');
        }
        Value::Pair(_) => write_list(value, out),
        Value::Primitive(record) => {
            let _ = write!(out, "#<primitive:{}>", record.name);
        }
        Value::Closure(_) => out.push_str("#<closure>"),
        Value::Reference(_) => out.push_str("#<reference>"),
    }
}

fn write_list(value: &Value<'_>, out: &mut String) {
    out.push('(');
    let mut current = *value;
    let mut first = true;
    loop {
        match current {
            Value::Pair(cell) => {
                if !first {
                    out.push(' ');
                }
                first = false;
                write_value(&cell.car.get(), out);
                current = cell.cdr.get();
            }
            Value::Nil => break,
            other => {
                // improper list: render the dotted tail
                out.push_str(" . ");
                write_value(&other, out);
                break;
            }
        }
    }
    out.push(')');
}
