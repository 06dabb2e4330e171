//! The line filter restricting which assignments the calculus transform touches.

use crate::error::{kind, Error};
use std::collections::BTreeSet;

/// A set of 1-based source line numbers. An empty set places no restriction at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet(BTreeSet<usize>);

impl LineSet {
    /// Creates an empty line set, which allows every line.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list of integers and inclusive ranges, e.g. `"2,5-7"` ->
    /// `{2, 5, 6, 7}`. Empty tokens are skipped, so `""` parses to the empty set.
    ///
    /// A malformed token is an error whose span points into `spec`.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let mut lines = BTreeSet::new();
        let mut offset = 0;

        for part in spec.split(',') {
            let span = offset..offset + part.len();
            offset += part.len() + 1;

            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let number = |text: &str| {
                text.trim()
                    .parse::<usize>()
                    .map_err(|_| Error::new(vec![span.clone()], kind::InvalidLineSpec))
            };

            if let Some((low, high)) = part.split_once('-') {
                lines.extend(number(low)?..=number(high)?);
            } else {
                lines.insert(number(part)?);
            }
        }

        Ok(Self(lines))
    }

    /// Returns true if the set places no restriction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the given line passes the filter: the set is empty, or contains the line.
    pub fn allows(&self, line: usize) -> bool {
        self.0.is_empty() || self.0.contains(&line)
    }
}

impl FromIterator<usize> for LineSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numbers_and_ranges() {
        let lines = LineSet::parse("2,5-7").unwrap();
        assert_eq!(lines, [2, 5, 6, 7].into_iter().collect());
    }

    #[test]
    fn empty_spec_allows_everything() {
        let lines = LineSet::parse("").unwrap();
        assert!(lines.is_empty());
        assert!(lines.allows(1));
        assert!(lines.allows(999));
    }

    #[test]
    fn non_empty_set_is_a_restriction() {
        let lines = LineSet::parse("1, 3-4").unwrap();
        assert!(lines.allows(1));
        assert!(!lines.allows(2));
        assert!(lines.allows(3));
        assert!(lines.allows(4));
        assert!(!lines.allows(5));
    }

    #[test]
    fn backwards_range_is_empty() {
        let lines = LineSet::parse("7-5").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn malformed_tokens() {
        assert!(LineSet::parse("a").is_err());
        assert!(LineSet::parse("1,x-3").is_err());
        assert!(LineSet::parse("-3").is_err());
        assert!(LineSet::parse("1.5").is_err());
    }
}
