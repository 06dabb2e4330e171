use std::{fmt, ops::Range};
use crate::parser::{
    error::Error,
    fmt::Render,
    token::{Float, Int, Name, Str},
    Parse,
    Parser,
};

/// An integer literal, stored as its source digits. Integers are arbitrary-precision; the digits
/// are converted to a numeric type by consumers of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LitInt {
    /// The digits of the integer literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Int>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

impl Render for LitInt {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A floating-point literal, stored as its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct LitFloat {
    /// The source text of the float literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitFloat {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Float>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

impl Render for LitFloat {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A string literal. The dialect has no escape sequences; the contents are stored verbatim,
/// without the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct LitStr {
    /// The contents of the string literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitStr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Str>()?;
        Ok(Self {
            value: token.lexeme[1..token.lexeme.len() - 1].to_owned(),
            span: token.span,
        })
    }
}

impl Render for LitStr {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.value.contains('\'') {
            write!(f, "\"{}\"", self.value)
        } else {
            write!(f, "'{}'", self.value)
        }
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables and function names.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

impl Render for LitSym {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value in a symfold script.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer literal, such as `2` or `144`.
    Integer(LitInt),

    /// A floating-point literal, such as `3.14` or `0.5`.
    Float(LitFloat),

    /// A string literal, such as `'hello'`.
    Str(LitStr),

    /// A symbol / identifier literal, such as `x` or `print`.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Str(string) => string.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitFloat>().map(Literal::Float)
            .or_else(|_| input.try_parse::<LitInt>().map(Literal::Integer))
            .or_else(|_| input.try_parse::<LitStr>().map(Literal::Str))
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}

impl Render for Literal {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt_source(f),
            Literal::Float(float) => float.fmt_source(f),
            Literal::Str(string) => string.fmt_source(f),
            Literal::Symbol(name) => name.fmt_source(f),
        }
    }
}
