use std::{fmt, ops::Range};
use crate::parser::{
    ast::expr::Expr,
    fmt::Render,
    Precedence,
};

/// A function call, such as `print('hello')` or `sin(x)`.
///
/// Calls with a plain-name target appear as opaque function atoms inside arithmetic; all other
/// calls are outside the symbolic engine's fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The expression being called, a name or attribute access.
    pub target: Box<Expr>,

    /// The arguments to the call.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// If the call target is a plain name, returns it.
    pub fn name(&self) -> Option<&str> {
        match self.target.innermost() {
            Expr::Literal(crate::parser::ast::literal::Literal::Symbol(sym)) => Some(&sym.name),
            _ => None,
        }
    }
}

impl Render for Call {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let target = self.target.innermost();
        if target.precedence() < Precedence::Atom {
            write!(f, "(")?;
            target.fmt_source(f)?;
            write!(f, ")")?;
        } else {
            target.fmt_source(f)?;
        }

        write!(f, "(")?;
        let mut iter = self.args.iter();
        if let Some(arg) = iter.next() {
            arg.fmt_source(f)?;
            for arg in iter {
                write!(f, ", ")?;
                arg.fmt_source(f)?;
            }
        }
        write!(f, ")")
    }
}
