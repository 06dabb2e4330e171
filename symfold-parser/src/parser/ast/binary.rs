use std::{fmt, ops::Range};
use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind, Error},
    fmt::Render,
    token::op::{BinOp, CompareOp, InfixOp},
    Associativity,
    Parser,
    Precedence,
};

/// An arithmetic binary expression, such as `1 + 2`. Binary expressions can include nested
/// expressions.
///
/// Only these nodes are rewritten by the optimization pipeline; comparisons are a separate node
/// kind and pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Continues parsing binary (and comparison) expressions onto `lhs`, consuming operators
    /// whose precedence is at least `precedence`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            let Ok(op) = input_ahead.try_parse::<InfixOp>() else { break };
            if op.precedence() < precedence {
                break;
            }
            input.set_cursor(&input_ahead);

            let mut rhs = input.try_parse_with_fn(Unary::parse_or_lower)?;

            // before creating the `lhs op rhs` node, check the following operator, if any: a
            // higher-precedence or right-associative operator must take `rhs` as its own
            // left-hand side first, so that `3 + 4 * 5` becomes `3 + (4 * 5)`
            loop {
                let mut input_ahead = input.clone();
                let Ok(next_op) = input_ahead.try_parse::<InfixOp>() else { break };
                if next_op.precedence() > op.precedence()
                    || (next_op.precedence() == op.precedence()
                        && next_op.associativity() == Associativity::Right)
                {
                    rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
                } else {
                    break;
                }
            }

            lhs = Self::combine(lhs, op, rhs)?;
        }

        Ok(lhs)
    }

    /// Creates the node representing `lhs op rhs`.
    fn combine(lhs: Expr, op: InfixOp, rhs: Expr) -> Result<Expr, Error> {
        let span = lhs.span().start..rhs.span().end;
        match op {
            InfixOp::Bin(op) => Ok(Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            })),
            InfixOp::Cmp(op) => {
                // comparisons do not chain
                if matches!(lhs, Expr::Compare(_)) {
                    return Err(Error::new_fatal(vec![op.span.clone()], kind::ChainedComparison));
                }

                Ok(Expr::Compare(Compare {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(rhs),
                    span,
                }))
            },
        }
    }
}

impl Render for Binary {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prec = self.op.precedence();
        let assoc = self.op.associativity();

        let lhs = self.lhs.innermost();
        if lhs.precedence() < prec
            || (lhs.precedence() == prec && assoc == Associativity::Right)
        {
            write!(f, "(")?;
            lhs.fmt_source(f)?;
            write!(f, ")")?;
        } else {
            lhs.fmt_source(f)?;
        }

        write!(f, " {} ", self.op.kind.as_str())?;

        let rhs = self.rhs.innermost();
        if rhs.precedence() < prec
            || (rhs.precedence() == prec && assoc == Associativity::Left)
        {
            write!(f, "(")?;
            rhs.fmt_source(f)?;
            write!(f, ")")
        } else {
            rhs.fmt_source(f)
        }
    }
}

/// A comparison expression, such as `a < b`. Comparisons do not chain, and are never rewritten by
/// the optimization pipeline; their operands are.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    /// The left-hand side of the comparison.
    pub lhs: Box<Expr>,

    /// The comparison operator.
    pub op: CompareOp,

    /// The right-hand side of the comparison.
    pub rhs: Box<Expr>,

    /// The region of the source code that this comparison was parsed from.
    pub span: Range<usize>,
}

impl Compare {
    /// Returns the span of the comparison.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Render for Compare {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lhs = self.lhs.innermost();
        if lhs.precedence() < Precedence::Compare {
            write!(f, "(")?;
            lhs.fmt_source(f)?;
            write!(f, ")")?;
        } else {
            lhs.fmt_source(f)?;
        }

        write!(f, " {} ", self.op.kind.as_str())?;

        let rhs = self.rhs.innermost();
        if rhs.precedence() <= Precedence::Compare {
            write!(f, "(")?;
            rhs.fmt_source(f)?;
            write!(f, ")")
        } else {
            rhs.fmt_source(f)
        }
    }
}
