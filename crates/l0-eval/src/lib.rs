//! The tree-walking evaluator: special forms, application, macro expansion,
//! and quasiquote template expansion.
//!
//! `eval` never holds a Rust stack frame per list element it walks — each of
//! its three recursive passes (expression evaluation, argument-list
//! evaluation, macro expansion) carries its own depth counter and fails with
//! `RuntimeStackOverflow` rather than overflowing the real stack.

mod eval;
mod macro_expand;
mod quasiquote;

pub use eval::{apply, eval};
pub use macro_expand::macroexpand;
pub use quasiquote::expand_qq;
