//! Error taxonomy shared by every stage of the compiler core.
//!
//! Rather than a process-wide diagnostic record (status code, message
//! pointer, line, column), every operation that can fail returns a
//! `Result<_, L0Error>`. The error carries its own message and, where
//! meaningful, the source position at which it was detected.

use crate::position::SourcePosition;
use std::fmt;

/// A failure from any stage: parsing, evaluation, macro expansion, or
/// code generation.
#[derive(Debug, Clone, PartialEq)]
pub enum L0Error {
    /// Unknown atom, stray `)`, malformed number.
    ParseInvalidSyntax {
        message: String,
        position: SourcePosition,
    },
    /// Unterminated list, string, or reader-macro operand.
    ParseUnexpectedEOF {
        message: String,
        position: SourcePosition,
    },
    /// Arena allocation failure during parsing.
    ParseMemory { message: String },
    /// Primitive argument type mismatch, or applying a non-function value.
    RuntimeTypeError {
        message: String,
        position: Option<SourcePosition>,
    },
    /// Wrong argument count for a primitive or closure.
    RuntimeArity {
        message: String,
        position: Option<SourcePosition>,
    },
    /// Symbol not found in the environment chain.
    RuntimeUnbound {
        message: String,
        position: Option<SourcePosition>,
    },
    /// `/` called with a zero divisor.
    RuntimeDivisionByZero {
        message: String,
        position: Option<SourcePosition>,
    },
    /// Evaluator, argument-list walker, or macro expander exceeded its
    /// recursion-depth guard.
    RuntimeStackOverflow {
        message: String,
        position: Option<SourcePosition>,
    },
    /// `*macro-table*` is structurally invalid (not a proper list of pairs).
    RuntimeMacroMalformed {
        message: String,
        position: Option<SourcePosition>,
    },
    /// File open/read/write failure.
    RuntimeIO {
        message: String,
        position: Option<SourcePosition>,
    },
    /// Invariant violation (e.g. a null function pointer reached apply).
    RuntimeInternal {
        message: String,
        position: Option<SourcePosition>,
    },
}

impl L0Error {
    #[must_use]
    pub fn parse_invalid_syntax(message: impl Into<String>, position: SourcePosition) -> Self {
        Self::ParseInvalidSyntax {
            message: message.into(),
            position,
        }
    }

    #[must_use]
    pub fn parse_unexpected_eof(message: impl Into<String>, position: SourcePosition) -> Self {
        Self::ParseUnexpectedEOF {
            message: message.into(),
            position,
        }
    }

    #[must_use]
    pub fn parse_memory(message: impl Into<String>) -> Self {
        Self::ParseMemory {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn runtime_type_error(message: impl Into<String>) -> Self {
        Self::RuntimeTypeError {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_arity(message: impl Into<String>) -> Self {
        Self::RuntimeArity {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_unbound(message: impl Into<String>) -> Self {
        Self::RuntimeUnbound {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_division_by_zero(message: impl Into<String>) -> Self {
        Self::RuntimeDivisionByZero {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_stack_overflow(message: impl Into<String>) -> Self {
        Self::RuntimeStackOverflow {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_macro_malformed(message: impl Into<String>) -> Self {
        Self::RuntimeMacroMalformed {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_io(message: impl Into<String>) -> Self {
        Self::RuntimeIO {
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn runtime_internal(message: impl Into<String>) -> Self {
        Self::RuntimeInternal {
            message: message.into(),
            position: None,
        }
    }

    /// Name of the error kind, matching the taxonomy table.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::ParseInvalidSyntax { .. } => "ParseInvalidSyntax",
            Self::ParseUnexpectedEOF { .. } => "ParseUnexpectedEOF",
            Self::ParseMemory { .. } => "ParseMemory",
            Self::RuntimeTypeError { .. } => "RuntimeTypeError",
            Self::RuntimeArity { .. } => "RuntimeArity",
            Self::RuntimeUnbound { .. } => "RuntimeUnbound",
            Self::RuntimeDivisionByZero { .. } => "RuntimeDivisionByZero",
            Self::RuntimeStackOverflow { .. } => "RuntimeStackOverflow",
            Self::RuntimeMacroMalformed { .. } => "RuntimeMacroMalformed",
            Self::RuntimeIO { .. } => "RuntimeIO",
            Self::RuntimeInternal { .. } => "RuntimeInternal",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ParseInvalidSyntax { message, .. }
            | Self::ParseUnexpectedEOF { message, .. }
            | Self::ParseMemory { message }
            | Self::RuntimeTypeError { message, .. }
            | Self::RuntimeArity { message, .. }
            | Self::RuntimeUnbound { message, .. }
            | Self::RuntimeDivisionByZero { message, .. }
            | Self::RuntimeStackOverflow { message, .. }
            | Self::RuntimeMacroMalformed { message, .. }
            | Self::RuntimeIO { message, .. }
            | Self::RuntimeInternal { message, .. } => message,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::ParseInvalidSyntax { position, .. } | Self::ParseUnexpectedEOF { position, .. } => {
                Some(*position)
            }
            Self::ParseMemory { .. } => None,
            Self::RuntimeTypeError { position, .. }
            | Self::RuntimeArity { position, .. }
            | Self::RuntimeUnbound { position, .. }
            | Self::RuntimeDivisionByZero { position, .. }
            | Self::RuntimeStackOverflow { position, .. }
            | Self::RuntimeMacroMalformed { position, .. }
            | Self::RuntimeIO { position, .. }
            | Self::RuntimeInternal { position, .. } => *position,
        }
    }

    /// Attaches a source position to a runtime error that doesn't already
    /// carry one (parse errors always carry their own).
    #[must_use]
    pub fn with_position(mut self, at: SourcePosition) -> Self {
        match &mut self {
            Self::RuntimeTypeError { position, .. }
            | Self::RuntimeArity { position, .. }
            | Self::RuntimeUnbound { position, .. }
            | Self::RuntimeDivisionByZero { position, .. }
            | Self::RuntimeStackOverflow { position, .. }
            | Self::RuntimeMacroMalformed { position, .. }
            | Self::RuntimeIO { position, .. }
            | Self::RuntimeInternal { position, .. } => *position = Some(at),
            Self::ParseInvalidSyntax { .. } | Self::ParseUnexpectedEOF { .. } | Self::ParseMemory { .. } => {}
        }
        self
    }
}

impl fmt::Display for L0Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(position) => write!(f, "{}: {} at {position}", self.kind_name(), self.message()),
            None => write!(f, "{}: {}", self.kind_name(), self.message()),
        }
    }
}

impl std::error::Error for L0Error {}

/// Result type used throughout the compiler core.
pub type L0Result<T> = Result<T, L0Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_includes_position() {
        let err = L0Error::parse_invalid_syntax("bad atom", SourcePosition::new(4, 1, 5));
        assert_eq!(format!("{err}"), "ParseInvalidSyntax: bad atom at 1:5");
    }

    #[test]
    fn runtime_error_display_without_position() {
        let err = L0Error::runtime_unbound("symbol 'x' is unbound");
        assert_eq!(format!("{err}"), "RuntimeUnbound: symbol 'x' is unbound");
    }

    #[test]
    fn with_position_attaches_to_runtime_errors_only() {
        let pos = SourcePosition::new(0, 2, 1);
        let err = L0Error::runtime_arity("wrong number of arguments").with_position(pos);
        assert_eq!(err.position(), Some(pos));
    }
}
