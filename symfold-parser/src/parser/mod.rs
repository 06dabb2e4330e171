pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;
use symfold_error::ErrorKind;

/// A high-level parser for symfold scripts. This is the type to use to parse an arbitrary piece
/// of source text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The byte offsets at which each line of the source code begins, used to resolve spans into
    /// 1-based line numbers.
    line_starts: Box<[usize]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source.char_indices()
                .filter(|(_, c)| *c == '\n')
                .map(|(offset, _)| offset + 1),
        );

        Self {
            tokens: tokenize_complete(source),
            line_starts: line_starts.into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the 1-based line number containing the given byte offset.
    pub fn line_at(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|start| *start <= offset)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Moves the cursor of this parser to the cursor of another parser, typically one that was
    /// cloned from this parser to parse ahead.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Advances the cursor past any whitespace, comment, and line break tokens.
    pub fn skip_trivia_lines(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if token.is_trivia() || token.kind == TokenKind::NewLine {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace and comment
    /// tokens are skipped; line break tokens are **not**, since they terminate statements.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_trivia() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) if err.fatal => return Err(err),
                Err(err) => {
                    if values.is_empty() {
                        self.cursor = start;
                        return Err(err);
                    } else {
                        return Ok(values);
                    }
                },
            }

            // peek past trivia for the delimiter
            let mut ahead = self.clone();
            match ahead.next_token() {
                Ok(token) if token.kind == delimiter => self.set_cursor(&ahead),
                _ => return Ok(values),
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_trivia_lines();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error_fatal(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The operation is left-associative: `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The operation is right-associative: `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of comparisons (`==`, `!=`, `<`, `<=`, `>`, and `>=`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary plus (`+`) and unary minus (`-`).
    Unary,

    /// Precedence of exponentiation (`**`).
    Pow,

    /// Precedence of atoms: literals, names, calls, and parenthesized expressions.
    Atom,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Script, assign::AssignTarget, expr::Expr, stmt::Stmt};
    use fmt::Render;

    /// Parses the given source into a full script.
    fn parse_script(source: &str) -> Script {
        Parser::new(source).try_parse_full::<Script>().unwrap()
    }

    /// Parses the given source and renders it back to canonical text.
    fn round_trip(source: &str) -> String {
        parse_script(source).to_source()
    }

    #[test]
    fn statement_kinds() {
        let script = parse_script("x = 1\nprint('hello')\n");
        assert_eq!(script.stmts.len(), 2);
        assert!(matches!(script.stmts[0], Stmt::Assign(_)));
        assert!(matches!(script.stmts[1], Stmt::Expr(_)));
    }

    #[test]
    fn assignment_lines_skip_blanks_and_comments() {
        let script = parse_script("x = 1\n\n# comment\ny = 2 # trailing\n");
        let lines = script.stmts.iter()
            .map(|stmt| match stmt {
                Stmt::Assign(assign) => assign.line,
                Stmt::Expr(_) => panic!("expected assignments"),
            })
            .collect::<Vec<_>>();
        assert_eq!(lines, vec![1, 4]);
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(round_trip("a = 1 + 2 * 3"), "a = 1 + 2 * 3");
        assert_eq!(round_trip("a = (1 + 2) * 3"), "a = (1 + 2) * 3");
        assert_eq!(round_trip("a = 2 ** 3 ** 4"), "a = 2 ** 3 ** 4");
        assert_eq!(round_trip("a = (2 ** 3) ** 4"), "a = (2 ** 3) ** 4");
        assert_eq!(round_trip("a = 1 - (2 - 3)"), "a = 1 - (2 - 3)");
        assert_eq!(round_trip("a = 1 - 2 - 3"), "a = 1 - 2 - 3");
        assert_eq!(round_trip("a = 1 / (2 * 3)"), "a = 1 / (2 * 3)");
    }

    #[test]
    fn unary_binds_looser_than_pow() {
        // `-x ** 2` is `-(x ** 2)`
        let script = parse_script("a = -x ** 2");
        let Stmt::Assign(assign) = &script.stmts[0] else { panic!("expected assignment") };
        assert!(matches!(assign.value, Expr::Unary(_)));
        assert_eq!(round_trip("a = -x ** 2"), "a = -x ** 2");
        assert_eq!(round_trip("a = (-x) ** 2"), "a = (-x) ** 2");
    }

    #[test]
    fn redundant_parens_are_dropped() {
        assert_eq!(round_trip("y = ((4)) * (2 + 3)"), "y = 4 * (2 + 3)");
        assert_eq!(round_trip("y = (x)"), "y = x");
    }

    #[test]
    fn normalized_spacing() {
        assert_eq!(round_trip("y=4*(2+3)"), "y = 4 * (2 + 3)");
        assert_eq!(round_trip("z  =  x   **   2"), "z = x ** 2");
    }

    #[test]
    fn calls_attributes_and_strings() {
        assert_eq!(round_trip("print('hello')"), "print('hello')");
        assert_eq!(round_trip("f()"), "f()");
        assert_eq!(round_trip("obj.attr = f(x, 1 + 2)"), "obj.attr = f(x, 1 + 2)");
        assert_eq!(round_trip("a.b.c = 1"), "a.b.c = 1");
    }

    #[test]
    fn chained_and_tuple_assignments() {
        let script = parse_script("x = y = 5");
        let Stmt::Assign(assign) = &script.stmts[0] else { panic!("expected assignment") };
        assert_eq!(assign.targets.len(), 2);
        assert!(assign.single_symbol_target().is_none());
        assert_eq!(round_trip("x = y = 5"), "x = y = 5");

        let script = parse_script("a, b = 1, 2");
        let Stmt::Assign(assign) = &script.stmts[0] else { panic!("expected assignment") };
        assert!(matches!(assign.targets[0], AssignTarget::Tuple(_)));
        assert_eq!(round_trip("a, b = 1, 2"), "a, b = 1, 2");
    }

    #[test]
    fn comparisons_do_not_chain() {
        assert_eq!(round_trip("a = x < 2 + 3"), "a = x < 2 + 3");
        assert!(Parser::new("a = x < y < z").try_parse_full::<Script>().is_err());
    }

    #[test]
    fn statements_cannot_share_a_line() {
        assert!(Parser::new("x = 1 y = 2").try_parse_full::<Script>().is_err());
    }

    #[test]
    fn unclosed_parenthesis_is_fatal() {
        let err = Parser::new("y = (1 + 2").try_parse_full::<Script>().unwrap_err();
        assert!(err.fatal);
    }

    #[test]
    fn empty_source() {
        let script = parse_script("");
        assert!(script.stmts.is_empty());
        assert_eq!(script.to_source(), "");
    }
}
