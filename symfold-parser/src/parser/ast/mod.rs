pub mod assign;
pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod member;
pub mod paren;
pub mod stmt;
pub mod tuple;
pub mod unary;

use std::{fmt, ops::Range};
use crate::parser::{
    error::Error,
    fmt::Render,
    Parse,
    Parser,
};
use stmt::Stmt;

/// A whole symfold script: a sequence of statements separated by line breaks.
///
/// Blank lines and comments are dropped during parsing; rendering produces one statement per
/// line.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// The statements of the script, in source order.
    pub stmts: Vec<Stmt>,

    /// The region of the source code that this script was parsed from.
    pub span: Range<usize>,
}

impl Script {
    /// Returns the span of the script.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Script {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut stmts = Vec::new();

        loop {
            input.skip_trivia_lines();
            if input.current_token().is_none() {
                break;
            }
            stmts.push(input.try_parse::<Stmt>()?);
        }

        let span = stmts.first()
            .map(|first| first.span().start..stmts.last().unwrap().span().end)
            .unwrap_or(0..0);
        Ok(Script { stmts, span })
    }
}

impl Render for Script {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.stmts.iter();
        if let Some(stmt) = iter.next() {
            stmt.fmt_source(f)?;
            for stmt in iter {
                writeln!(f)?;
                stmt.fmt_source(f)?;
            }
        }
        Ok(())
    }
}
