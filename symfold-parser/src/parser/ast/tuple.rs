use std::{fmt, ops::Range};
use crate::parser::{ast::expr::Expr, fmt::Render};

/// A tuple of expressions, such as `1, 2`. Tuples only appear as the value of an assignment with
/// tuple or multiple targets; they are never rewritten as a whole, though binary operations
/// inside their elements are.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// The elements of the tuple. Always at least two.
    pub elements: Vec<Expr>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

impl Tuple {
    /// Creates a tuple from its elements. The elements must not be empty.
    pub fn new(elements: Vec<Expr>) -> Self {
        let span = elements.first()
            .map(|first| first.span().start..elements.last().unwrap().span().end)
            .unwrap_or(0..0);
        Self { elements, span }
    }

    /// Returns the span of the tuple.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Render for Tuple {
    fn fmt_source(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.elements.iter();
        if let Some(element) = iter.next() {
            element.fmt_source(f)?;
            for element in iter {
                write!(f, ", ")?;
                element.fmt_source(f)?;
            }
        }
        Ok(())
    }
}
