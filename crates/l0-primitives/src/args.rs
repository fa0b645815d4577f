//! `argv`/`argc` handoff (§5): the driver captures the process's command
//! line once at start-up and hands it to this crate before evaluation
//! begins; the `command-line-args` primitive reads it back.

use l0_mem::Arena;
use l0_syntax::{Env, L0Result, Value};
use std::sync::OnceLock;

use crate::support::exact_arity;

static COMMAND_LINE_ARGS: OnceLock<Vec<String>> = OnceLock::new();

/// Records the process's argv tail (everything after the input file name)
/// for later retrieval by `command-line-args`. Intended to be called once,
/// by the CLI driver, before any L0 code runs.
pub fn set_command_line_args(args: Vec<String>) {
    let _ = COMMAND_LINE_ARGS.set(args);
}

pub(crate) fn command_line_args<'arena>(
    args: Value<'arena>,
    _env: Env<'arena>,
    arena: &'arena Arena,
) -> L0Result<Value<'arena>> {
    let items = crate::support::args_vec(args, "command-line-args")?;
    exact_arity(&items, "command-line-args", 0)?;
    let recorded = COMMAND_LINE_ARGS.get().map(Vec::as_slice).unwrap_or(&[]);
    let values = recorded
        .iter()
        .map(|s| Value::string(arena, s))
        .collect::<Vec<_>>();
    Ok(Value::list_from_iter(arena, values.into_iter()))
}
