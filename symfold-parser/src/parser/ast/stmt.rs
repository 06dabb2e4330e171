use std::fmt;
use std::ops::Range;
use crate::{
    parser::{
        ast::{assign::Assign, expr::Expr},
        error::{kind, Error},
        fmt::Render,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// Represents a top-level statement in a symfold script. Statements are separated by line
/// breaks.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An assignment statement, such as `x = 2 * 3`.
    Assign(Assign),

    /// A bare expression evaluated for its side effects, such as `print('hello')`.
    Expr(Expr),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Assign(assign) => assign.span(),
            Stmt::Expr(expr) => expr.span(),
        }
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let stmt = match input.try_parse::<Assign>() {
            Ok(assign) => Stmt::Assign(assign),
            Err(err) if err.fatal => return Err(err),
            Err(_) => Stmt::Expr(input.try_parse::<Expr>()?),
        };

        // the statement must be followed by a line break or the end of the input
        let mut input_ahead = input.clone();
        match input_ahead.next_token() {
            Err(_) => {},
            Ok(token) if token.kind == TokenKind::NewLine => input.set_cursor(&input_ahead),
            Ok(token) => {
                return Err(Error::new_fatal(vec![token.span], kind::ExpectedEndOfLine {
                    found: token.kind,
                }));
            },
        }

        Ok(stmt)
    }
}

impl Render for Stmt {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Assign(assign) => assign.fmt_source(f),
            Stmt::Expr(expr) => expr.fmt_source(f),
        }
    }
}
