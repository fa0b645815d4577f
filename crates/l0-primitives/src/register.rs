//! Wires every primitive into an environment's top-level frame.

use l0_mem::Arena;
use l0_syntax::{Env, L0Result, Value};

/// Defines every primitive in §6's table (plus `ref`) in `env`'s frame.
/// Call once on the global environment, before evaluating any user code.
pub fn register_primitives<'arena>(env: Env<'arena>, arena: &'arena Arena) -> L0Result<()> {
    l0_log::debug!("registering primitive library");
    let entries: &[(&str, l0_syntax::PrimitiveFn<'arena>)] = &[
        ("cons", crate::list::cons),
        ("car", crate::list::car),
        ("cdr", crate::list::cdr),
        ("pair?", crate::list::is_pair),
        ("null?", crate::list::is_null),
        ("list", crate::list::list),
        ("append", crate::list::append),
        ("ref", crate::list::make_reference),
        ("deref", crate::list::deref),
        ("+", crate::arithmetic::add),
        ("-", crate::arithmetic::sub),
        ("*", crate::arithmetic::mul),
        ("/", crate::arithmetic::div),
        ("=", crate::arithmetic::num_eq),
        ("<", crate::arithmetic::num_lt),
        (">", crate::arithmetic::num_gt),
        ("integer?", crate::predicates::is_integer),
        ("boolean?", crate::predicates::is_boolean),
        ("symbol?", crate::predicates::is_symbol),
        ("string?", crate::predicates::is_string),
        ("float?", crate::predicates::is_float),
        ("closure?", crate::predicates::is_closure),
        ("not", crate::predicates::not),
        ("string-append", crate::strings::string_append),
        ("string->symbol", crate::strings::string_to_symbol),
        ("symbol->string", crate::strings::symbol_to_string),
        ("string-length", crate::strings::string_length),
        ("string-ref", crate::strings::string_ref),
        ("substring", crate::strings::substring),
        ("number->string", crate::strings::number_to_string),
        ("print", crate::strings::print),
        ("read-file", crate::io::read_file),
        ("write-file", crate::io::write_file),
        ("command-line-args", crate::args::command_line_args),
        ("parse-string", crate::io::parse_string),
        ("codegen-program", crate::io::codegen_program),
        ("get-last-error-message", crate::last_error::get_last_error_message),
        ("get-last-error-line", crate::last_error::get_last_error_line),
        ("get-last-error-col", crate::last_error::get_last_error_col),
        ("eval", crate::reflection::eval),
        ("apply", crate::reflection::apply),
        ("eval-in-compiler-env", crate::reflection::eval_in_compiler_env),
        ("is-macro?", crate::reflection::is_macro),
        ("get-macro-transformer", crate::reflection::get_macro_transformer),
    ];
    for (name, func) in entries {
        l0_env::define(arena, env, name, Value::primitive(arena, name, *func))?;
    }
    Ok(())
}
