//! The calculus transform: replace assignment values with their derivative and/or
//! antiderivative with respect to the assignment target.

use crate::bridge;
use crate::error::Error;
use crate::line_set::LineSet;
use crate::symbolic::{antiderivative::antiderivative, derivative::derivative};
use std::collections::BTreeSet;
use symfold_parser::parser::ast::{assign::Assign, stmt::Stmt, Script};
use tracing::debug;

/// Rewrites the values of selected top-level assignments with their derivative and/or
/// antiderivative with respect to the assignment's target name.
///
/// Only assignments whose single target is a plain name participate; everything else passes
/// through untouched. When a name is selected for both differentiation and integration, the
/// integration step runs on the output of the differentiation step — the two are sequential,
/// not mutually exclusive.
#[derive(Debug, Clone, Default)]
pub struct Calculus {
    /// Names whose assignments are differentiated.
    diff_vars: BTreeSet<String>,

    /// Names whose assignments are integrated.
    int_vars: BTreeSet<String>,

    /// Line filter applied to both variable sets. Empty means no restriction.
    lines: LineSet,
}

impl Calculus {
    /// Creates a calculus transform over the given variable sets and line filter.
    pub fn new(diff_vars: BTreeSet<String>, int_vars: BTreeSet<String>, lines: LineSet) -> Self {
        Self { diff_vars, int_vars, lines }
    }

    /// Returns true if the transform can never rewrite anything.
    pub fn is_noop(&self) -> bool {
        self.diff_vars.is_empty() && self.int_vars.is_empty()
    }

    /// Applies the transform to every qualifying top-level assignment.
    ///
    /// Fails with `UnsupportedExpression` on the first value the symbolic engine cannot
    /// differentiate or integrate.
    pub fn apply(&self, script: Script) -> Result<Script, Error> {
        let span = script.span.clone();
        let stmts = script.stmts.into_iter()
            .map(|stmt| self.apply_stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Script { stmts, span })
    }

    fn apply_stmt(&self, stmt: Stmt) -> Result<Stmt, Error> {
        let Stmt::Assign(assign) = stmt else { return Ok(stmt) };
        let Some(name) = assign.single_symbol_target().map(|sym| sym.name.clone()) else {
            return Ok(Stmt::Assign(assign));
        };

        let Assign { targets, mut value, line, span } = assign;
        if self.lines.allows(line) {
            if self.diff_vars.contains(&name) {
                debug!(variable = %name, line, "differentiating assignment");
                value = bridge::roundtrip(&value, |sym| derivative(&sym, &name))?;
            }

            // intentionally sequential: integration sees the differentiated value
            if self.int_vars.contains(&name) {
                debug!(variable = %name, line, "integrating assignment");
                value = bridge::roundtrip(&value, |sym| antiderivative(&sym, &name))?;
            }
        }

        Ok(Stmt::Assign(Assign { targets, value, line, span }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::optimize::Optimizer;
    use symfold_parser::{Parser, parser::fmt::Render};

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    /// Applies the calculus transform and re-renders, without re-optimizing.
    fn transformed(source: &str, calculus: &Calculus) -> String {
        let script = Parser::new(source).try_parse_full::<Script>().unwrap();
        calculus.apply(script).unwrap().to_source()
    }

    /// Applies the calculus transform followed by the optimization pipeline, mirroring the full
    /// per-file flow.
    fn transformed_and_optimized(source: &str, calculus: &Calculus) -> String {
        let script = Parser::new(source).try_parse_full::<Script>().unwrap();
        let script = calculus.apply(script).unwrap();

        // the pipeline re-parses the re-rendered text rather than reusing live nodes
        let rendered = script.to_source();
        let script = Parser::new(&rendered).try_parse_full::<Script>().unwrap();
        Optimizer::new(false).optimize(script).unwrap().to_source()
    }

    #[test]
    fn differentiation() {
        let calculus = Calculus::new(names(&["x", "y", "z"]), names(&[]), LineSet::empty());
        assert_eq!(transformed_and_optimized("x = 2 * (3 + 5)", &calculus), "x = 0");
        assert_eq!(transformed_and_optimized("y = x ** 3", &calculus), "y = 3 * x ** 2");
        assert_eq!(transformed_and_optimized("z = 5", &calculus), "z = 0");
    }

    #[test]
    fn integration() {
        let calculus = Calculus::new(names(&[]), names(&["x", "y", "z", "a", "b", "c"]), LineSet::empty());
        assert_eq!(transformed_and_optimized("y = 6", &calculus), "y = 6 * x");
        assert_eq!(transformed_and_optimized("z = 2 * x", &calculus), "z = x ** 2");
        assert_eq!(transformed_and_optimized("a = x ** 2", &calculus), "a = x ** 3 / 3");
        assert_eq!(transformed_and_optimized("b = x + 1", &calculus), "b = x * (x + 2) / 2");
        assert_eq!(transformed_and_optimized("c = 2 + 3", &calculus), "c = 5 * x");
    }

    #[test]
    fn integration_uses_the_target_name() {
        let calculus = Calculus::new(names(&[]), names(&["y"]), LineSet::empty());
        assert_eq!(transformed_and_optimized("y = 6", &calculus), "y = 6 * y");
    }

    #[test]
    fn sequential_composition() {
        // differentiate first, then integrate the derivative: x**3 -> 3*x**2 -> x**3
        let calculus = Calculus::new(names(&["x"]), names(&["x"]), LineSet::empty());
        assert_eq!(transformed_and_optimized("x = x ** 3", &calculus), "x = x ** 3");
    }

    #[test]
    fn line_filter() {
        let calculus = Calculus::new(names(&["x"]), names(&[]), LineSet::parse("2").unwrap());
        assert_eq!(
            transformed("x = x ** 2\nx = x ** 3", &calculus),
            "x = x ** 2\nx = 3 * x ** 2",
        );
    }

    #[test]
    fn only_single_name_targets() {
        let calculus = Calculus::new(names(&["x", "obj"]), names(&[]), LineSet::empty());
        assert_eq!(transformed("x = y = x ** 2", &calculus), "x = y = x ** 2");
        assert_eq!(transformed("obj.attr = x ** 2", &calculus), "obj.attr = x ** 2");
        assert_eq!(transformed("print(x ** 2)", &calculus), "print(x ** 2)");
    }

    #[test]
    fn unsupported_values_are_fatal() {
        let calculus = Calculus::new(names(&["x"]), names(&[]), LineSet::empty());
        let script = Parser::new("x = f(x)").try_parse_full::<Script>().unwrap();
        assert!(calculus.apply(script).is_err());
    }

    #[test]
    fn noop_detection() {
        assert!(Calculus::default().is_noop());
        assert!(!Calculus::new(names(&["x"]), names(&[]), LineSet::empty()).is_noop());
    }
}
