//! Recursive-descent S-expression parser.
//!
//! There is no separate lexer stage: the parser recognizes token kinds
//! (parens, atoms, strings, reader-macro prefixes) directly against the
//! character stream, the way a small Lisp reader traditionally does.

use crate::error::{L0Error, L0Result};
use crate::position::SourcePosition;
use crate::value::Value;
use l0_mem::Arena;

/// A parse session: current input position plus the arena expressions are
/// allocated into. All diagnostics are returned, not recorded globally —
/// parsing stops and propagates on the first error rather than attempting
/// recovery.
pub struct Parser<'input, 'arena> {
    source: &'input str,
    pos: usize,
    line: usize,
    column: usize,
    arena: &'arena Arena,
}

impl<'input, 'arena> Parser<'input, 'arena> {
    #[must_use]
    pub fn new(source: &'input str, arena: &'arena Arena) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            arena,
        }
    }

    /// Parses every top-level form in `source` into a proper list. Empty
    /// input yields `Nil`. The parser never mutates `source`.
    pub fn parse_string_all(source: &'input str, arena: &'arena Arena) -> L0Result<Value<'arena>> {
        l0_log::debug!("parsing {} byte(s) of source", source.len());
        let mut parser = Self::new(source, arena);
        parser.parse_top_level()
    }

    fn parse_top_level(&mut self) -> L0Result<Value<'arena>> {
        let mut forms = Vec::new();
        loop {
            self.skip_atmosphere();
            if self.at_eof() {
                break;
            }
            forms.push(self.parse_expr()?);
        }
        Ok(Value::list_from_iter(self.arena, forms.into_iter()))
    }

    // --- character-level primitives ---

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn position(&self) -> SourcePosition {
        SourcePosition::new(self.pos, self.line, self.column)
    }

    fn skip_atmosphere(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump_char();
                }
                Some(';') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump_char();
                    }
                }
                _ => break,
            }
        }
    }

    // --- grammar ---

    fn parse_expr(&mut self) -> L0Result<Value<'arena>> {
        self.skip_atmosphere();
        match self.peek_char() {
            None => Err(L0Error::parse_unexpected_eof(
                "expected an expression, found end of input",
                self.position(),
            )),
            Some('(') => self.parse_list(),
            Some(')') => Err(L0Error::parse_invalid_syntax(
                "unexpected ')'",
                self.position(),
            )),
            Some('\'') => self.parse_reader_macro("quote", 1),
            Some('`') => self.parse_reader_macro("quasiquote", 1),
            Some(',') if self.peek_second_char() == Some('@') => {
                self.parse_reader_macro("unquote-splicing", 2)
            }
            Some(',') => self.parse_reader_macro("unquote", 1),
            Some('"') => self.parse_string_literal(),
            Some('#') => self.parse_hash_literal(),
            _ => self.parse_atom(),
        }
    }

    fn parse_reader_macro(&mut self, head: &str, prefix_len: usize) -> L0Result<Value<'arena>> {
        for _ in 0..prefix_len {
            self.bump_char();
        }
        let operand = self.parse_expr()?;
        let head = Value::symbol(self.arena, head);
        Ok(Value::cons(
            self.arena,
            head,
            Value::cons(self.arena, operand, Value::Nil),
        ))
    }

    fn parse_list(&mut self) -> L0Result<Value<'arena>> {
        let start = self.position();
        self.bump_char(); // '('
        let mut items = Vec::new();
        loop {
            self.skip_atmosphere();
            match self.peek_char() {
                None => {
                    return Err(L0Error::parse_unexpected_eof(
                        "unterminated list",
                        start,
                    ));
                }
                Some(')') => {
                    self.bump_char();
                    break;
                }
                _ => items.push(self.parse_expr()?),
            }
        }
        Ok(Value::list_from_iter(self.arena, items.into_iter()))
    }

    fn parse_string_literal(&mut self) -> L0Result<Value<'arena>> {
        let start = self.position();
        self.bump_char(); // opening quote
        let mut text = String::new();
        loop {
            match self.bump_char() {
                None => {
                    return Err(L0Error::parse_unexpected_eof(
                        "unterminated string literal",
                        start,
                    ));
                }
                Some('"') => break,
                Some('\\') => match self.bump_char() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\\') => text.push('\\'),
                    Some('"') => text.push('"'),
                    Some(other) => {
                        return Err(L0Error::parse_invalid_syntax(
                            format!("invalid escape sequence '\\{other}'"),
                            start,
                        ));
                    }
                    None => {
                        return Err(L0Error::parse_unexpected_eof(
                            "unterminated string literal",
                            start,
                        ));
                    }
                },
                Some(c) => text.push(c),
            }
        }
        Ok(Value::string(self.arena, &text))
    }

    fn parse_hash_literal(&mut self) -> L0Result<Value<'arena>> {
        let start = self.position();
        self.bump_char(); // '#'
        match self.bump_char() {
            Some('t') => Ok(Value::Boolean(true)),
            Some('f') => Ok(Value::Boolean(false)),
            Some(other) => Err(L0Error::parse_invalid_syntax(
                format!("invalid atom '#{other}'"),
                start,
            )),
            None => Err(L0Error::parse_unexpected_eof(
                "unexpected end of input after '#'",
                start,
            )),
        }
    }

    /// Identifier start: a letter or one of `_+-*/=!?<>:.&|`.
    fn is_symbol_start(c: char) -> bool {
        c.is_alphabetic() || "_+-*/=!?<>:.&|".contains(c)
    }

    /// Identifier continuation: start characters plus digits.
    fn is_symbol_continue(c: char) -> bool {
        Self::is_symbol_start(c) || c.is_ascii_digit()
    }

    fn parse_atom(&mut self) -> L0Result<Value<'arena>> {
        let start = self.position();
        let start_offset = self.pos;
        match self.peek_char() {
            // A numeral token starts with a digit, which is a continuation
            // character but not an identifier-start character, so it needs
            // its own arm here alongside the `+`/`-`-prefixed case already
            // covered by `is_symbol_start`.
            Some(c) if c.is_ascii_digit() || Self::is_symbol_start(c) => {}
            other => {
                return Err(L0Error::parse_invalid_syntax(
                    format!("invalid atom starting with {other:?}"),
                    start,
                ));
            }
        }
        while let Some(c) = self.peek_char() {
            if Self::is_symbol_continue(c) {
                self.bump_char();
            } else {
                break;
            }
        }
        let text = &self.source[start_offset..self.pos];

        // The scan above is maximal once entered — none of the valid token
        // separators (whitespace, parens, `;`) are continuation characters —
        // so a full-text numeric parse is equivalent to the separator-checked
        // parse the grammar describes: a trailing letter (`1.2abc`) stays
        // part of `text` and fails the numeric parse, falling through to a
        // symbol.
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Value::Integer(value));
        }
        if text.contains('.') || text.contains('e') || text.contains('E') {
            if let Ok(value) = text.parse::<f64>() {
                return Ok(Value::Float(value));
            }
        }
        Ok(Value::symbol(self.arena, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(source: &str) -> Value<'_> {
        let arena = Box::leak(Box::new(Arena::with_defaults()));
        Parser::parse_string_all(source, arena)
            .unwrap()
            .car()
            .expect("expected at least one form")
    }

    #[test]
    fn parses_integers_and_floats() {
        assert!(matches!(parse_one("42"), Value::Integer(42)));
        assert!(matches!(parse_one("-7"), Value::Integer(-7)));
        assert!(matches!(parse_one("3.14"), Value::Float(f) if (f - 3.14).abs() < 1e-9));
        assert!(matches!(parse_one("1.2abc"), Value::Symbol(s) if s == "1.2abc"));
    }

    #[test]
    fn parses_booleans_and_symbols() {
        assert!(matches!(parse_one("#t"), Value::Boolean(true)));
        assert!(matches!(parse_one("#f"), Value::Boolean(false)));
        assert!(parse_one("define").is_symbol_named("define"));
        assert!(parse_one("+").is_symbol_named("+"));
    }

    #[test]
    fn parses_strings_with_escapes() {
        let value = parse_one(r#""hi\nthere""#);
        assert!(matches!(value, Value::String(s) if s == "hi\nthere"));
    }

    #[test]
    fn parses_nested_lists() {
        let value = parse_one("(+ 1 (* 2 3))");
        let items = value.list_to_vec().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_symbol_named("+"));
        assert!(matches!(items[1], Value::Integer(1)));
        let nested = items[2].list_to_vec().unwrap();
        assert_eq!(nested.len(), 3);
    }

    #[test]
    fn quote_desugars_to_quote_form() {
        let value = parse_one("'x");
        let items = value.list_to_vec().unwrap();
        assert!(items[0].is_symbol_named("quote"));
        assert!(items[1].is_symbol_named("x"));
    }

    #[test]
    fn quasiquote_and_unquote_splicing_desugar() {
        let value = parse_one("`(1 ,(+ 1 1) ,@rest)");
        let items = value.list_to_vec().unwrap();
        assert!(items[0].is_symbol_named("quasiquote"));
        let template = items[1].list_to_vec().unwrap();
        assert!(matches!(template[0], Value::Integer(1)));
        let unquoted = template[1].list_to_vec().unwrap();
        assert!(unquoted[0].is_symbol_named("unquote"));
        let spliced = template[2].list_to_vec().unwrap();
        assert!(spliced[0].is_symbol_named("unquote-splicing"));
    }

    #[test]
    fn unterminated_list_is_unexpected_eof() {
        let arena = Arena::with_defaults();
        let err = Parser::parse_string_all("(a b", &arena).unwrap_err();
        assert!(matches!(err, L0Error::ParseUnexpectedEOF { .. }));
    }

    #[test]
    fn stray_close_paren_is_invalid_syntax() {
        let arena = Arena::with_defaults();
        let err = Parser::parse_string_all(")", &arena).unwrap_err();
        assert!(matches!(err, L0Error::ParseInvalidSyntax { .. }));
    }

    #[test]
    fn empty_input_is_nil() {
        let arena = Arena::with_defaults();
        let value = Parser::parse_string_all("   ; just a comment\n", &arena).unwrap();
        assert!(value.is_nil());
    }

    #[test]
    fn multiple_top_level_forms() {
        let arena = Arena::with_defaults();
        let value = Parser::parse_string_all("(define x 1) (+ x 1)", &arena).unwrap();
        let forms = value.list_to_vec().unwrap();
        assert_eq!(forms.len(), 2);
    }
}
