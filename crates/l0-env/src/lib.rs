//! Lexically nested environments.
//!
//! An environment is a handle (`l0_syntax::Env`) to an arena-owned record
//! holding a mutable frame — an association list of `(symbol . value)`
//! bindings — and an optional parent. This crate supplies the operations
//! over that record; the record type itself lives in `l0_syntax` next to
//! `Value`, since a closure's captured environment is itself a `Value`
//! payload and the two types are otherwise impossible to split without a
//! dependency cycle.

use l0_mem::Arena;
use l0_syntax::{Env, EnvRecord, L0Error, L0Result, Value};
use std::cell::Cell;

/// Creates a fresh environment with an empty frame and the given parent.
#[must_use]
pub fn create<'arena>(arena: &'arena Arena, outer: Option<Env<'arena>>) -> Env<'arena> {
    let record = arena.alloc(EnvRecord {
        frame: Cell::new(Value::Nil),
        outer,
    });
    Env(record)
}

/// Creates a new environment sharing the arena, with an empty frame and
/// `env` as its parent.
#[must_use]
pub fn extend<'arena>(arena: &'arena Arena, env: Env<'arena>) -> Env<'arena> {
    create(arena, Some(env))
}

/// Looks up `symbol`, walking `env`'s frame then its `outer` chain.
///
/// Frame traversal is cycle-safe (Floyd's tortoise-and-hare): a frame whose
/// `cdr` chain loops back on itself fails with `RuntimeInternal` instead of
/// looping forever.
pub fn lookup<'arena>(env: Env<'arena>, symbol: &str) -> L0Result<Value<'arena>> {
    let mut current = Some(env);
    while let Some(e) = current {
        if let Some(value) = lookup_frame(e.frame(), symbol)? {
            return Ok(value);
        }
        current = e.outer();
    }
    Err(L0Error::runtime_unbound(format!(
        "unbound variable '{symbol}'"
    )))
}

/// Binds `symbol` to `value` in `env`'s own frame: overwrites the existing
/// binding if `symbol` already appears there (head frame only — an outer
/// frame's binding of the same name is shadowed, not touched), otherwise
/// prepends a new binding.
pub fn define<'arena>(
    arena: &'arena Arena,
    env: Env<'arena>,
    symbol: &str,
    value: Value<'arena>,
) -> L0Result<()> {
    let mut node = env.frame();
    while let Value::Pair(frame_cell) = node {
        let binding_cell = binding_cell_of(frame_cell.car.get())?;
        if binding_names(binding_cell.car.get(), symbol) {
            binding_cell.cdr.set(value);
            return Ok(());
        }
        node = frame_cell.cdr.get();
    }
    let symbol_value = Value::symbol(arena, symbol);
    let binding = Value::cons(arena, symbol_value, value);
    env.set_frame(Value::cons(arena, binding, env.frame()));
    Ok(())
}

/// Mutates the first matching binding found by walking `env`'s frame, then
/// its `outer` chain. Never creates a binding; an unbound symbol is an
/// error.
pub fn set_bang<'arena>(env: Env<'arena>, symbol: &str, value: Value<'arena>) -> L0Result<()> {
    let mut current = Some(env);
    while let Some(e) = current {
        let mut node = e.frame();
        while let Value::Pair(frame_cell) = node {
            let binding_cell = binding_cell_of(frame_cell.car.get())?;
            if binding_names(binding_cell.car.get(), symbol) {
                binding_cell.cdr.set(value);
                return Ok(());
            }
            node = frame_cell.cdr.get();
        }
        current = e.outer();
    }
    Err(L0Error::runtime_unbound(format!(
        "cannot set! unbound variable '{symbol}'"
    )))
}

/// Creates the top-level environment and defines the process's start-up
/// globals: `*macro-table*`, `*c-declarations*`, `*c-exports-code*` (all
/// `Nil`) and `*global-scope-id*` (the integer `0`).
pub fn create_global<'arena>(arena: &'arena Arena) -> L0Result<Env<'arena>> {
    let env = create(arena, None);
    define(arena, env, "*macro-table*", Value::Nil)?;
    define(arena, env, "*c-declarations*", Value::Nil)?;
    define(arena, env, "*c-exports-code*", Value::Nil)?;
    define(arena, env, "*global-scope-id*", Value::Integer(0))?;
    Ok(env)
}

fn binding_cell_of<'arena>(binding: Value<'arena>) -> L0Result<&'arena l0_syntax::PairCell<'arena>> {
    match binding {
        Value::Pair(cell) => Ok(cell),
        _ => Err(malformed_frame_error()),
    }
}

fn binding_names(head: Value<'_>, symbol: &str) -> bool {
    matches!(head, Value::Symbol(s) if s == symbol)
}

fn malformed_frame_error() -> L0Error {
    L0Error::runtime_internal("environment frame is not a proper list of bindings")
}

enum Step<'arena> {
    Found(Value<'arena>),
    End,
    Next(Value<'arena>),
}

fn advance<'arena>(node: Value<'arena>, symbol: &str) -> L0Result<Step<'arena>> {
    match node {
        Value::Nil => Ok(Step::End),
        Value::Pair(frame_cell) => {
            let binding_cell = binding_cell_of(frame_cell.car.get())?;
            if binding_names(binding_cell.car.get(), symbol) {
                Ok(Step::Found(binding_cell.cdr.get()))
            } else {
                Ok(Step::Next(frame_cell.cdr.get()))
            }
        }
        _ => Err(malformed_frame_error()),
    }
}

fn same_node(a: Value<'_>, b: Value<'_>) -> bool {
    match (a, b) {
        (Value::Pair(a), Value::Pair(b)) => std::ptr::eq(a, b),
        _ => false,
    }
}

fn lookup_frame<'arena>(frame: Value<'arena>, symbol: &str) -> L0Result<Option<Value<'arena>>> {
    let mut slow = frame;
    let mut fast = frame;
    loop {
        match advance(fast, symbol)? {
            Step::Found(value) => return Ok(Some(value)),
            Step::End => return Ok(None),
            Step::Next(next) => fast = next,
        }
        match advance(fast, symbol)? {
            Step::Found(value) => return Ok(Some(value)),
            Step::End => return Ok(None),
            Step::Next(next) => fast = next,
        }
        slow = match slow {
            Value::Pair(cell) => cell.cdr.get(),
            _ => return Err(malformed_frame_error()),
        };
        if same_node(slow, fast) {
            return Err(L0Error::runtime_internal(
                "cycle detected in environment frame",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup() {
        let arena = Arena::with_defaults();
        let env = create(&arena, None);
        define(&arena, env, "x", Value::Integer(5)).unwrap();
        assert!(matches!(lookup(env, "x"), Ok(Value::Integer(5))));
    }

    #[test]
    fn define_overwrites_existing_head_binding() {
        let arena = Arena::with_defaults();
        let env = create(&arena, None);
        define(&arena, env, "x", Value::Integer(1)).unwrap();
        define(&arena, env, "x", Value::Integer(2)).unwrap();
        assert!(matches!(lookup(env, "x"), Ok(Value::Integer(2))));
    }

    #[test]
    fn lookup_unbound_is_error() {
        let arena = Arena::with_defaults();
        let env = create(&arena, None);
        assert!(matches!(lookup(env, "nope"), Err(L0Error::RuntimeUnbound { .. })));
    }

    #[test]
    fn extend_sees_outer_bindings() {
        let arena = Arena::with_defaults();
        let outer = create(&arena, None);
        define(&arena, outer, "x", Value::Integer(10)).unwrap();
        let inner = extend(&arena, outer);
        assert!(matches!(lookup(inner, "x"), Ok(Value::Integer(10))));
    }

    #[test]
    fn inner_define_does_not_leak_to_outer() {
        let arena = Arena::with_defaults();
        let outer = create(&arena, None);
        let inner = extend(&arena, outer);
        define(&arena, inner, "y", Value::Integer(1)).unwrap();
        assert!(matches!(lookup(outer, "y"), Err(L0Error::RuntimeUnbound { .. })));
    }

    #[test]
    fn set_bang_mutates_outer_binding() {
        let arena = Arena::with_defaults();
        let outer = create(&arena, None);
        define(&arena, outer, "x", Value::Integer(1)).unwrap();
        let inner = extend(&arena, outer);
        set_bang(inner, "x", Value::Integer(2)).unwrap();
        assert!(matches!(lookup(outer, "x"), Ok(Value::Integer(2))));
    }

    #[test]
    fn set_bang_never_creates_a_binding() {
        let arena = Arena::with_defaults();
        let env = create(&arena, None);
        assert!(matches!(
            set_bang(env, "z", Value::Integer(1)),
            Err(L0Error::RuntimeUnbound { .. })
        ));
    }

    #[test]
    fn cyclic_frame_fails_instead_of_looping() {
        let arena = Arena::with_defaults();
        let env = create(&arena, None);
        define(&arena, env, "a", Value::Integer(1)).unwrap();
        define(&arena, env, "b", Value::Integer(2)).unwrap();
        // Splice the frame list into a cycle: find the tail cell and point
        // its cdr back at the head.
        if let Value::Pair(head_cell) = env.frame() {
            if let Value::Pair(tail_cell) = head_cell.cdr.get() {
                tail_cell.cdr.set(env.frame());
            }
        }
        assert!(matches!(
            lookup(env, "does-not-exist"),
            Err(L0Error::RuntimeInternal { .. })
        ));
    }
}
