use std::{fmt, ops::Range};
use crate::parser::{
    error::{kind, Error},
    fmt::Render,
    token::{CloseParen, OpenParen},
    ast::expr::Expr,
    Parse,
    Parser,
};

/// A parenthesized expression, such as `(1 + 2)`.
///
/// Parentheses only group during parsing; rendering reconstructs grouping from precedence, so a
/// `Paren` node renders as its inner expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The expression inside the parentheses.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression, unwrapping any nested parentheses.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;

        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error_fatal(kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new_fatal(vec![open.span.clone()], kind::UnclosedParenthesis {
                opening: true,
            }))?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}

impl Render for Paren {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.expr.fmt_source(f)
    }
}
