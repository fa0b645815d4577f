//! Reflective access to the most recent recovered failure (§6:
//! `get-last-error-message`/`-line`/`-col`).
//!
//! Every other operation in this codebase threads its failure through a
//! `Result` (§9's "Diagnostics" note explicitly rejects a process-wide
//! error record). These three primitives exist only because the external
//! interface calls for them; they read a slot that the handful of
//! primitives documented to swallow their error and return `#f`
//! (`read-file`, `write-file`, `parse-string`, `codegen-program`) populate
//! on the way down to `#f`, rather than from any evaluator-wide state.

use l0_mem::Arena;
use l0_syntax::{Env, L0Error, L0Result, Value};
use std::cell::RefCell;

#[derive(Clone)]
struct LastError {
    message: String,
    line: i64,
    column: i64,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<LastError>> = const { RefCell::new(None) };
}

pub(crate) fn record(error: &L0Error) {
    let (line, column) = error
        .position()
        .map(|p| (p.line as i64, p.column as i64))
        .unwrap_or((-1, -1));
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = Some(LastError {
            message: error.message().to_string(),
            line,
            column,
        });
    });
}

#[must_use]
pub fn last_error_message() -> Option<String> {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map(|e| e.message.clone()))
}

#[must_use]
pub fn last_error_line() -> i64 {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(-1, |e| e.line))
}

#[must_use]
pub fn last_error_col() -> i64 {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map_or(-1, |e| e.column))
}

pub(crate) fn get_last_error_message<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = crate::support::args_vec(args, "get-last-error-message")?;
    crate::support::exact_arity(&items, "get-last-error-message", 0)?;
    Ok(match last_error_message() {
        Some(message) => Value::string(arena, &message),
        None => Value::Boolean(false),
    })
}

pub(crate) fn get_last_error_line<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = crate::support::args_vec(args, "get-last-error-line")?;
    crate::support::exact_arity(&items, "get-last-error-line", 0)?;
    Ok(Value::Integer(last_error_line()))
}

pub(crate) fn get_last_error_col<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    _arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = crate::support::args_vec(args, "get-last-error-col")?;
    crate::support::exact_arity(&items, "get-last-error-col", 0)?;
    Ok(Value::Integer(last_error_col()))
}
