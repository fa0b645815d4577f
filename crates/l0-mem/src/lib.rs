//! L0 memory management infrastructure.
//!
//! This crate provides the single arena allocator used throughout the L0
//! compiler core: every `Value`, every AST pair cell, and every C-emitter
//! string buffer is allocated from one arena and lives exactly as long as
//! it does (§3.2, §4.1 of the memory model).
//!
//! # Design Goals
//!
//! 1. **No per-value freeing** — bulk deallocation only, via `reset`/`destroy`.
//! 2. **Safety** — allocations are ordinary `&'arena` references; the borrow
//!    checker, not a runtime check, prevents using them past `reset`/`destroy`.
//! 3. **Simplicity** — one arena implementation for the whole project, no
//!    thread-safe/thread-local split (the system is single-threaded, §5).

pub mod arena;

pub use arena::{Arena, ArenaAllocError, ArenaStats};
