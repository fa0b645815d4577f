//! File I/O and compiler-hook primitives.
//!
//! `read-file`, `write-file`, `parse-string`, and `codegen-program` are the
//! primitives §7 documents as swallowing their error and returning `#f`
//! instead of propagating it through the calling L0 program — but they
//! still record the failure via `last_error::record` first, so
//! `get-last-error-message` can recover it.

use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Parser, Value};
use std::fs;

use crate::support::{args_vec, as_string, exact_arity};

pub(crate) fn read_file<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "read-file")?;
    exact_arity(&items, "read-file", 1)?;
    let path = as_string(items[0], "read-file")?;
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Value::string(arena, &contents)),
        Err(err) => {
            crate::last_error::record(&L0Error::runtime_io(format!("read-file: {err}")));
            Ok(Value::Boolean(false))
        }
    }
}

pub(crate) fn write_file<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "write-file")?;
    exact_arity(&items, "write-file", 2)?;
    let path = as_string(items[0], "write-file")?;
    let contents = as_string(items[1], "write-file")?;
    match fs::write(path, contents) {
        Ok(()) => Ok(Value::Boolean(true)),
        Err(err) => {
            crate::last_error::record(&L0Error::runtime_io(format!("write-file: {err}")));
            Ok(Value::Boolean(false))
        }
    }
}

pub(crate) fn parse_string<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "parse-string")?;
    exact_arity(&items, "parse-string", 1)?;
    let source = as_string(items[0], "parse-string")?;
    match Parser::parse_string_all(source, arena) {
        Ok(forms) => Ok(forms),
        Err(err) => {
            crate::last_error::record(&err);
            Ok(Value::Boolean(false))
        }
    }
}

pub(crate) fn codegen_program<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = args_vec(args, "codegen-program")?;
    exact_arity(&items, "codegen-program", 1)?;
    let forms = items[0]
        .list_to_vec()
        .ok_or_else(|| L0Error::runtime_type_error("codegen-program: expected a proper list of forms"))?;
    match l0_codegen::emit_program(&forms, arena) {
        Ok(c_source) => Ok(Value::string(arena, &c_source)),
        Err(err) => {
            crate::last_error::record(&err);
            Ok(Value::Boolean(false))
        }
    }
}
