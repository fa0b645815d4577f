//! Value model and S-expression parser for the L0 compiler core.
//!
//! This crate owns the data the rest of the compiler operates on:
//!
//! - [`value`] — the `Value` tagged sum, pairs, closures, primitives, and
//!   the `Env` handle closures capture.
//! - [`position`] — source location tracking.
//! - [`error`] — the `L0Error` taxonomy and `L0Result` alias used
//!   throughout every downstream crate.
//! - [`parser`] — the recursive-descent reader that turns source text into
//!   an arena-rooted pair tree.
//! - [`pretty`] — writes a `Value` back out as L0 surface syntax, used for
//!   parse/print round-tripping and for rendering quoted data in error
//!   messages.

pub mod error;
pub mod parser;
pub mod position;
pub mod pretty;
pub mod value;

pub use error::{L0Error, L0Result};
pub use parser::Parser;
pub use position::SourcePosition;
pub use pretty::unparse;
pub use value::{ClosureRecord, Env, EnvRecord, PairCell, PrimitiveFn, PrimitiveRecord, Value};
