//! Simplification and expansion of expressions.
//!
//! An expression is reduced by applying a set of rewrite rules over and over, bottom-up, until a
//! full pass leaves the expression unchanged (under strict equality). Each rule is a function
//! that accepts an expression and returns `Option<SymExpr>`: `Some` with the rewritten
//! expression if the rule applies, `None` otherwise. The current rule set is defined in
//! [`rules`].
//!
//! [`simplify`] performs canonical reduction: constant folding, combining like terms and
//! factors, and identity elimination. It never distributes products over sums, so factored
//! shapes survive. [`expand`] runs the same engine with the distribution rules enabled,
//! producing a fully multiplied-out sum of monomials.

pub mod fraction;
pub mod rules;
pub mod step;

use super::expr::{Primary, SymExpr};
use super::step_collector::StepCollector;
pub use step::Step;

/// The signature of a composed rule set: the expression to rewrite, and the collector for the
/// steps taken.
type RuleSet = fn(&SymExpr, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// Applies one bottom-up pass of the given rule set: children first, then the node itself.
///
/// Rebuilding the children with the flattening `+` / `*` operators re-normalizes sums of sums
/// and products of products that the child rewrites may have produced.
fn apply_pass(
    expr: &SymExpr,
    rule_set: RuleSet,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let expr = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| apply_pass(arg, rule_set, step_collector))
                .collect();
            SymExpr::Primary(Primary::Call(name.clone(), args))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => {
            terms.iter()
                .map(|term| apply_pass(term, rule_set, step_collector))
                .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term)
        },
        SymExpr::Mul(factors) => {
            factors.iter()
                .map(|factor| apply_pass(factor, rule_set, step_collector))
                .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor)
        },
        SymExpr::Exp(base, exp) => SymExpr::Exp(
            Box::new(apply_pass(base, rule_set, step_collector)),
            Box::new(apply_pass(exp, rule_set, step_collector)),
        ),
    };

    rule_set(&expr, step_collector).unwrap_or(expr)
}

/// Runs the given rule set to a fixed point under strict equality.
fn reduce_with(
    expr: &SymExpr,
    rule_set: RuleSet,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut current = expr.clone();
    loop {
        let next = apply_pass(&current, rule_set, step_collector);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Simplifies an expression to its canonical reduced form.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies an expression, collecting the rewrite steps taken into the given collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    reduce_with(expr, rules::all, step_collector)
}

/// Fully distributes products and powers, producing a sum of monomials.
pub fn expand(expr: &SymExpr) -> SymExpr {
    expand_with(expr, &mut ())
}

/// Expands an expression, collecting the rewrite steps taken into the given collector.
pub fn expand_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    reduce_with(expr, rules::all_expanding, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::Parser;
    use symfold_parser::parser::ast::expr::Expr as AstExpr;

    /// Parses the given expression into a [`SymExpr`].
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from_ast(&expr).unwrap()
    }

    /// Parses, simplifies, and renders the given expression.
    fn simplified(input: &str) -> String {
        simplify(&parse_expr(input)).to_string()
    }

    /// Parses, expands, and renders the given expression.
    fn expanded(input: &str) -> String {
        expand(&parse_expr(input)).to_string()
    }

    #[test]
    fn constant_folding() {
        assert_eq!(simplified("4 * (2 + 3)"), "20");
        assert_eq!(simplified("(1 + 2) * ((3 + 4) + 5)"), "36");
        assert_eq!(simplified("5 - (2 + 3)"), "0");
        assert_eq!(simplified("2 * (3 + (4 + 1))"), "16");
        assert_eq!(simplified("2 ** 3"), "8");
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("2 * x + 2 * x"), "4 * x");
        assert_eq!(simplified("x + x + x"), "3 * x");
        assert_eq!(simplified("(x + 3) + (x + 3)"), "2 * x + 6");
    }

    #[test]
    fn simplify_does_not_distribute() {
        assert_eq!(simplified("2 * (x + 3)"), "2 * (x + 3)");
    }

    #[test]
    fn like_factors_become_powers() {
        assert_eq!(simplified("(x + 2) * (x + 2)"), "(x + 2) ** 2");
        assert_eq!(simplified("x * x"), "x ** 2");
        assert_eq!(simplified("x ** 2 * x ** 3"), "x ** 5");
    }

    #[test]
    fn fraction_reduction() {
        assert_eq!(simplified("3 / 12"), "1 / 4");
        assert_eq!(simplified("12 / 3"), "4");
        assert_eq!(simplified("x / 1"), "x");
    }

    #[test]
    fn opaque_calls_are_atoms() {
        assert_eq!(simplified("sin(x) + sin(x)"), "2 * sin(x)");
        assert_eq!(simplified("sin(2 + 3) * 1"), "sin(5)");
    }

    #[test]
    fn expansion() {
        assert_eq!(expanded("(x + 2) ** 2"), "x ** 2 + 4 * x + 4");
        assert_eq!(expanded("2 * (x - 1) * (x + 1)"), "2 * x ** 2 - 2");
        assert_eq!(expanded("2 * (x + 3)"), "2 * x + 6");
    }

    #[test]
    fn simplification_is_a_fixed_point() {
        for input in ["4 * x", "2 * (x + 3)", "(x + 2) ** 2", "x ** 3 / 3"] {
            let once = simplify(&parse_expr(input));
            let twice = simplify(&once);
            assert_eq!(once, twice);
        }
    }
}
