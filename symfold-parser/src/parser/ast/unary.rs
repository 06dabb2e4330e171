use std::{fmt, ops::Range};
use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    fmt::Render,
    token::op::UnaryOp,
    Parser,
    Precedence,
};

/// A unary operation, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or any expression with a higher precedence.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if let Ok(op) = input.try_parse::<UnaryOp>() {
            let operand = Self::parse_or_lower(input)?;

            // exponentiation binds tighter than unary minus: `-x ** 2` is `-(x ** 2)`
            let operand = Binary::parse_expr(input, operand, Precedence::Pow)?;

            let span = op.span.start..operand.span().end;
            return Ok(Expr::Unary(Unary {
                op,
                operand: Box::new(operand),
                span,
            }));
        }

        Expr::parse_postfix(input)
    }
}

impl Render for Unary {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.op.kind.as_str())?;
        let operand = self.operand.innermost();
        if operand.precedence() < Precedence::Unary {
            write!(f, "(")?;
            operand.fmt_source(f)?;
            write!(f, ")")
        } else {
            operand.fmt_source(f)
        }
    }
}
