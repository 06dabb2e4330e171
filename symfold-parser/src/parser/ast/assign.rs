use std::{fmt, ops::Range};
use crate::{
    parser::{
        ast::{expr::Expr, literal::{LitSym, Literal}, member::Attribute, tuple::Tuple},
        error::{kind, Error},
        fmt::Render,
        token::{Assign as AssignTok, Dot},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

/// An assignment target, such as `x`, `obj.attr`, or `a, b`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// A plain name, such as `x`. This is the only target form the calculus transform acts on.
    Symbol(LitSym),

    /// An attribute path, such as `obj.attr`.
    Attribute(Attribute),

    /// A tuple of names and attribute paths, such as `a, b`.
    Tuple(Vec<AssignTarget>),
}

impl AssignTarget {
    /// Returns the span of the assignment target.
    pub fn span(&self) -> Range<usize> {
        match self {
            AssignTarget::Symbol(symbol) => symbol.span.clone(),
            AssignTarget::Attribute(attr) => attr.span(),
            AssignTarget::Tuple(parts) => {
                let first = parts.first().map(|part| part.span().start).unwrap_or(0);
                let last = parts.last().map(|part| part.span().end).unwrap_or(0);
                first..last
            },
        }
    }

    /// If the target is a plain name, returns it.
    pub fn as_symbol(&self) -> Option<&LitSym> {
        match self {
            AssignTarget::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Parses a single (non-tuple) target: a name, optionally followed by an attribute path.
    fn parse_simple(input: &mut Parser) -> Result<Self, Error> {
        let base = input.try_parse::<LitSym>()?;
        let mut target = AssignTarget::Symbol(base);

        loop {
            let mut input_ahead = input.clone();
            if input_ahead.try_parse::<Dot>().is_err() {
                break;
            }
            input.set_cursor(&input_ahead);
            let name = input.try_parse::<LitSym>()?;
            let span = target.span().start..name.span.end;
            let expr = match target {
                AssignTarget::Symbol(symbol) => Expr::Literal(Literal::Symbol(symbol)),
                AssignTarget::Attribute(attr) => Expr::Attribute(attr),
                AssignTarget::Tuple(_) => unreachable!("tuples have no attribute path"),
            };
            target = AssignTarget::Attribute(Attribute {
                target: Box::new(expr),
                name,
                span,
            });
        }

        Ok(target)
    }
}

impl Parse for AssignTarget {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut parts = vec![input.try_parse_with_fn(Self::parse_simple)?];

        loop {
            let mut input_ahead = input.clone();
            match input_ahead.next_token() {
                Ok(token) if token.kind == TokenKind::Comma => {
                    input.set_cursor(&input_ahead);
                    parts.push(input.try_parse_with_fn(Self::parse_simple)?);
                },
                _ => break,
            }
        }

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(AssignTarget::Tuple(parts))
        }
    }
}

impl Render for AssignTarget {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignTarget::Symbol(symbol) => symbol.fmt_source(f),
            AssignTarget::Attribute(attr) => attr.fmt_source(f),
            AssignTarget::Tuple(parts) => {
                let mut iter = parts.iter();
                if let Some(part) = iter.next() {
                    part.fmt_source(f)?;
                    for part in iter {
                        write!(f, ", ")?;
                        part.fmt_source(f)?;
                    }
                }
                Ok(())
            },
        }
    }
}

/// An assignment statement, such as `x = 1` or `x = y = 2 * x`.
///
/// Only assignments whose single target is a plain name participate in the calculus transform;
/// everything else passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// The targets of the assignment. Always at least one; more than one for chained
    /// assignments such as `x = y = 5`.
    pub targets: Vec<AssignTarget>,

    /// The value assigned to the targets.
    pub value: Expr,

    /// The 1-based source line the assignment starts on.
    pub line: usize,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl Assign {
    /// Returns the span of the assignment.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// If the assignment has exactly one plain-name target, returns it.
    pub fn single_symbol_target(&self) -> Option<&LitSym> {
        match self.targets.as_slice() {
            [target] => target.as_symbol(),
            _ => None,
        }
    }
}

impl Parse for Assign {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut targets = Vec::new();

        loop {
            let mut input_ahead = input.clone();
            let Ok(target) = input_ahead.try_parse::<AssignTarget>() else { break };
            if input_ahead.try_parse::<AssignTok>().is_ok() {
                input.set_cursor(&input_ahead);
                targets.push(target);
            } else {
                break;
            }
        }

        if targets.is_empty() {
            return Err(input.error(kind::NonFatal));
        }

        let mut values = input.try_parse_delimited::<Expr>(TokenKind::Comma)?;
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            Expr::Tuple(Tuple::new(values))
        };

        let span = targets[0].span().start..value.span().end;
        let line = input.line_at(span.start);
        Ok(Assign { targets, value, line, span })
    }
}

impl Render for Assign {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for target in &self.targets {
            target.fmt_source(f)?;
            write!(f, " = ")?;
        }
        self.value.fmt_source(f)
    }
}
