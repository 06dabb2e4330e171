//! Structs to help parse binary, comparison, and unary operators.

use crate::{
    parser::{
        error::{Error, kind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOpKind {
    Neg,
    Pos,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        Precedence::Unary
    }

    /// Returns the source text of the unary operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Pos => "+",
        }
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Sub => Ok(UnaryOpKind::Neg),
            TokenKind::Add => Ok(UnaryOpKind::Pos),
            _ => Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected: &[TokenKind::Sub, TokenKind::Add],
                found: token.kind,
            })),
        }?;

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

/// The arithmetic binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOpKind {
    Pow,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Pow => Precedence::Pow,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            Self::Mul | Self::Div | Self::Add | Self::Sub => Associativity::Left,
        }
    }

    /// Returns the source text of the binary operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pow => "**",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }
}

/// An arithmetic binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Pow => Ok(BinOpKind::Pow),
            TokenKind::Mul => Ok(BinOpKind::Mul),
            TokenKind::Div => Ok(BinOpKind::Div),
            TokenKind::Add => Ok(BinOpKind::Add),
            TokenKind::Sub => Ok(BinOpKind::Sub),
            _ => Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Pow,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                ],
                found: token.kind,
            })),
        }?;

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

/// The comparison operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOpKind {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl CompareOpKind {
    /// Returns the source text of the comparison operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
        }
    }
}

/// A comparison operator that takes two operands. Comparisons do not chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOp {
    /// The kind of comparison operator.
    pub kind: CompareOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl Parse for CompareOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Eq => Ok(CompareOpKind::Eq),
            TokenKind::NotEq => Ok(CompareOpKind::NotEq),
            TokenKind::Less => Ok(CompareOpKind::Less),
            TokenKind::LessEq => Ok(CompareOpKind::LessEq),
            TokenKind::Greater => Ok(CompareOpKind::Greater),
            TokenKind::GreaterEq => Ok(CompareOpKind::GreaterEq),
            _ => Err(Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Eq,
                    TokenKind::NotEq,
                    TokenKind::Less,
                    TokenKind::LessEq,
                    TokenKind::Greater,
                    TokenKind::GreaterEq,
                ],
                found: token.kind,
            })),
        }?;

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

/// Either an arithmetic or a comparison infix operator. Used by the precedence-climbing parser,
/// which handles both uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum InfixOp {
    /// An arithmetic operator, such as `+` or `**`.
    Bin(BinOp),

    /// A comparison operator, such as `==` or `<`.
    Cmp(CompareOp),
}

impl InfixOp {
    /// Returns the precedence of the operator.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Bin(op) => op.precedence(),
            Self::Cmp(_) => Precedence::Compare,
        }
    }

    /// Returns the associativity of the operator.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Bin(op) => op.associativity(),
            Self::Cmp(_) => Associativity::Left,
        }
    }
}

impl Parse for InfixOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<BinOp>().map(Self::Bin)
            .or_else(|_| input.try_parse::<CompareOp>().map(Self::Cmp))
    }
}
