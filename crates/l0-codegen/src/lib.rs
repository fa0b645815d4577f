//! Translates an already macro-expanded AST into a single C translation
//! unit, syntax-directed, per form.
//!
//! This crate never evaluates anything: it only ever reads `Value` trees and
//! writes C source text. The `env`/`arena` C identifiers it emits name the
//! runtime objects the *generated* program will create at its own startup;
//! nothing here touches `l0_env`/`l0_eval` at translation time.

mod builder;
mod emit;
mod names;

pub use builder::StringBuilder;
pub use emit::emit_program;
