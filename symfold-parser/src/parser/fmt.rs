//! Canonical source rendering for the syntax tree.
//!
//! Re-rendering is normalizing: operators are surrounded by single spaces, list elements are
//! separated by `, `, and parentheses are reconstructed purely from operator precedence, so
//! redundant grouping in the input does not survive a round-trip. The rendered text is always
//! re-parseable into an equivalent tree.

use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be rendered as canonical source text.
pub trait Render {
    /// Format the value as source text.
    fn fmt_source(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`SourceFormatter`], which implements [`Display`].
    fn as_source(&self) -> SourceFormatter<'_, Self> {
        SourceFormatter(self)
    }

    /// Renders the value to an owned string of source text.
    fn to_source(&self) -> String
    where
        Self: Sized,
    {
        self.as_source().to_string()
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Render`].
pub struct SourceFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for SourceFormatter<'_, T>
where
    T: Render,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_source(f)
    }
}
