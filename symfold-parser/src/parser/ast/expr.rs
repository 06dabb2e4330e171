use std::{fmt, ops::Range};
use crate::{
    parser::{
        ast::{
            binary::{Binary, Compare},
            call::Call,
            literal::{LitSym, Literal},
            member::Attribute,
            paren::Paren,
            tuple::Tuple,
            unary::Unary,
        },
        error::{kind, Error},
        fmt::Render,
        token::CloseParen,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};

/// Represents a general expression in a symfold script.
///
/// An expression is any valid piece of code that can be evaluated to produce a value.
/// Expressions can be used as the right-hand side of an assignment, or as the argument to a
/// function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `print('hello')`.
    Call(Call),

    /// An attribute access, such as `obj.attr`.
    Attribute(Attribute),

    /// A tuple of expressions, such as `1, 2`. Tuples only appear as assignment values.
    Tuple(Tuple),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// An arithmetic binary operation, such as `1 + 2`.
    Binary(Binary),

    /// A comparison, such as `a < b`.
    Compare(Compare),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Attribute(attr) => attr.span(),
            Expr::Tuple(tuple) => tuple.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Compare(compare) => compare.span(),
        }
    }

    /// Returns the precedence of the expression, used to reconstruct parentheses when rendering.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_) | Expr::Attribute(_) => {
                Precedence::Atom
            },
            Expr::Tuple(_) => Precedence::Any,
            Expr::Unary(_) => Precedence::Unary,
            Expr::Binary(binary) => binary.op.precedence(),
            Expr::Compare(_) => Precedence::Compare,
        }
    }

    /// Returns the innermost expression, unwrapping any parentheses around this expression.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Parses an atom (a literal or a parenthesized expression) followed by any number of
    /// postfix operations: attribute accesses and calls.
    pub(crate) fn parse_postfix(input: &mut Parser) -> Result<Expr, Error> {
        let mut expr = match input.try_parse::<Paren>() {
            Ok(paren) => Expr::Paren(paren),
            Err(err) if err.fatal => return Err(err),
            Err(_) => input.try_parse::<Literal>().map(Expr::Literal)?,
        };

        loop {
            let mut input_ahead = input.clone();
            let Ok(token) = input_ahead.next_token() else { break };
            match token.kind {
                TokenKind::Dot => {
                    input.set_cursor(&input_ahead);
                    let name = input.try_parse::<LitSym>()?;
                    let span = expr.span().start..name.span.end;
                    expr = Expr::Attribute(Attribute {
                        target: Box::new(expr),
                        name,
                        span,
                    });
                },
                TokenKind::OpenParen => {
                    input.set_cursor(&input_ahead);

                    let args = if let Ok(close) = input.try_parse::<CloseParen>() {
                        let span = expr.span().start..close.span.end;
                        expr = Expr::Call(Call {
                            target: Box::new(expr),
                            args: Vec::new(),
                            span,
                        });
                        continue;
                    } else {
                        input.try_parse_delimited::<Expr>(TokenKind::Comma)?
                    };

                    let close = input.try_parse::<CloseParen>()
                        .map_err(|_| Error::new_fatal(vec![token.span.clone()], kind::UnclosedParenthesis {
                            opening: true,
                        }))?;

                    let span = expr.span().start..close.span.end;
                    expr = Expr::Call(Call {
                        target: Box::new(expr),
                        args,
                        span,
                    });
                },
                _ => break,
            }
        }

        Ok(expr)
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error_fatal(kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = input.try_parse_with_fn(Unary::parse_or_lower)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl Render for Expr {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_source(f),
            Expr::Paren(paren) => paren.fmt_source(f),
            Expr::Call(call) => call.fmt_source(f),
            Expr::Attribute(attr) => attr.fmt_source(f),
            Expr::Tuple(tuple) => tuple.fmt_source(f),
            Expr::Unary(unary) => unary.fmt_source(f),
            Expr::Binary(binary) => binary.fmt_source(f),
            Expr::Compare(compare) => compare.fmt_source(f),
        }
    }
}
