use std::{fmt, ops::Range};
use crate::parser::{
    ast::{expr::Expr, literal::LitSym},
    fmt::Render,
    Precedence,
};

/// An attribute access, such as `obj.attr` or `a.b.c`.
///
/// Attributes are opaque to the symbolic engine; assignments to attribute targets are carried
/// through untouched, and attribute accesses inside arithmetic make the enclosing expression
/// unsupported.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The expression whose attribute is accessed.
    pub target: Box<Expr>,

    /// The name of the attribute.
    pub name: LitSym,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Attribute {
    /// Returns the span of the attribute access.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Render for Attribute {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let target = self.target.innermost();
        if target.precedence() < Precedence::Atom {
            write!(f, "(")?;
            target.fmt_source(f)?;
            write!(f, ")")?;
        } else {
            target.fmt_source(f)?;
        }
        write!(f, ".")?;
        self.name.fmt_source(f)
    }
}
