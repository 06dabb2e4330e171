//! Symbolic differentiation.

use crate::primitive::{float, int};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use super::expr::{Primary, SymExpr};
use super::simplify::fraction::make_fraction;
use super::Unsupported;

/// Something that is not trivially zero - intended to clean up the built expressions and not
/// mathematically rigorous.
fn non_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => !f.is_zero(),
        SymExpr::Primary(Primary::Integer(i)) => !i.is_zero(),
        SymExpr::Add(sum) => sum.iter().any(non_zero),
        SymExpr::Mul(mul) => mul.iter().all(non_zero),
        _ => true,
    }
}

/// Something that is not trivially one - intended to clean up the built expressions and not
/// mathematically rigorous.
fn non_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Float(f)) => !f.eq(&float(1.0)),
        SymExpr::Primary(Primary::Integer(i)) => !i.eq(&int(1)),
        SymExpr::Mul(exprs) => exprs.iter().any(non_unity),
        SymExpr::Exp(expr, expr1) => non_zero(expr1) && non_unity(expr),
        _ => true,
    }
}

#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        if value.0.len() > 1 {
            SymExpr::Mul(value.0)
        } else if value.0.len() == 1 {
            value.0[0].clone()
        } else {
            SymExpr::Primary(Primary::Integer(int(1)))
        }
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if !non_zero(&e) || self.0.first().is_some_and(|e| !non_zero(e)) {
            self.0 = vec![SymExpr::Primary(Primary::Integer(int(0)))];
            return;
        }

        if non_unity(&e) {
            self.0.push(e)
        }
    }
}

#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        if value.0.len() > 1 {
            SymExpr::Add(value.0)
        } else if value.0.len() == 1 {
            value.0[0].clone()
        } else {
            SymExpr::Primary(Primary::Integer(int(0)))
        }
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if non_zero(&e) {
            self.0.push(e)
        }
    }
}

/// Builds a single-argument call expression.
fn call1(name: &str, arg: SymExpr) -> SymExpr {
    SymExpr::Primary(Primary::Call(name.to_owned(), vec![arg]))
}

/// The derivative of each known function with respect to its argument. The chain rule factor is
/// supplied by the caller.
type FnDerivative = fn(&SymExpr) -> SymExpr;

static KNOWN_DERIVATIVES: Lazy<HashMap<&'static str, FnDerivative>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, FnDerivative> = HashMap::new();
    map.insert("sin", |arg| call1("cos", arg.clone()));
    map.insert("cos", |arg| {
        SymExpr::Primary(Primary::Integer(int(-1))) * call1("sin", arg.clone())
    });
    map.insert("exp", |arg| call1("exp", arg.clone()));
    map.insert("log", |arg| SymExpr::Exp(
        Box::new(arg.clone()),
        Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
    ));
    map.insert("sqrt", |arg| make_fraction(
        SymExpr::Primary(Primary::Integer(int(1))),
        SymExpr::Primary(Primary::Integer(int(2))) * call1("sqrt", arg.clone()),
    ));
    map
});

fn sum_rule(exprs: &[SymExpr], with: &str) -> Result<SymExpr, Unsupported> {
    let mut sum = SumBuilder::default();
    for elem in exprs {
        sum.add(derivative(elem, with)?);
    }
    Ok(sum.into())
}

fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, Unsupported> {
    let mut outer_sum = SumBuilder::default();

    // f'*g*h + f*g'*h + f*g*h'
    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for term_index in 0..product.len() {
            let term = if derivative_index == term_index {
                derivative(&product[derivative_index], with)?
            } else {
                product[term_index].clone()
            };

            inner_mult.mult(term);
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Produces the derivative of the given expression with respect to the given symbol.
///
/// No simplification is performed beyond suppressing trivial zeros and ones; the caller is
/// expected to run the result through the optimization pipeline.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, Unsupported> {
    if !f.contains_symbol(with) {
        return Ok(SymExpr::Primary(Primary::Integer(int(0))));
    }

    match f {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => {
            Ok(SymExpr::Primary(Primary::Integer(int(0))))
        },
        SymExpr::Primary(Primary::Symbol(_)) => {
            // `contains_symbol` above means this is the variable itself
            Ok(SymExpr::Primary(Primary::Integer(int(1))))
        },
        SymExpr::Primary(Primary::Call(func, args)) => {
            let (Some(rule), [arg]) = (KNOWN_DERIVATIVES.get(func.as_str()), args.as_slice()) else {
                return Err(Unsupported);
            };

            // chain rule
            let mut mult_group = MultBuilder::default();
            mult_group.mult(derivative(arg, with)?);
            mult_group.mult(rule(arg));
            Ok(mult_group.into())
        },
        SymExpr::Add(exprs) => sum_rule(exprs, with),
        SymExpr::Mul(exprs) => product_rule(exprs, with),
        SymExpr::Exp(base, exp) => {
            if !exp.contains_symbol(with) {
                // d/dx f^c = c * f^(c-1) * f'
                let one_less = match &**exp {
                    SymExpr::Primary(Primary::Integer(n)) => {
                        SymExpr::Primary(Primary::Integer(int(n.clone() - 1)))
                    },
                    SymExpr::Primary(Primary::Float(n)) => {
                        SymExpr::Primary(Primary::Float(n.clone() - float(1.0)))
                    },
                    other => other.clone() + SymExpr::Primary(Primary::Integer(int(-1))),
                };

                let power = if one_less.as_integer().map(|n| n == &1).unwrap_or(false) {
                    (**base).clone()
                } else {
                    SymExpr::Exp(base.clone(), Box::new(one_less))
                };

                let mut mult_group = MultBuilder::default();
                mult_group.mult((**exp).clone());
                mult_group.mult(power);
                mult_group.mult(derivative(base, with)?);
                Ok(mult_group.into())
            } else if !base.contains_symbol(with) {
                // d/dx a^g = a^g * ln(a) * g'
                let mut mult_group = MultBuilder::default();
                mult_group.mult(SymExpr::Exp(base.clone(), exp.clone()));
                mult_group.mult(call1("log", (**base).clone()));
                mult_group.mult(derivative(exp, with)?);
                Ok(mult_group.into())
            } else {
                Err(Unsupported)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::Parser;
    use symfold_parser::parser::ast::expr::Expr as AstExpr;

    /// Parses, differentiates with respect to `x`, and renders the given expression.
    fn diffed(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let sym = SymExpr::from_ast(&expr).unwrap();
        derivative(&sym, "x").unwrap().to_string()
    }

    #[test]
    fn constants_vanish() {
        assert_eq!(diffed("5"), "0");
        assert_eq!(diffed("2 * (3 + 5)"), "0");
        assert_eq!(diffed("y"), "0");
    }

    #[test]
    fn power_rule() {
        assert_eq!(diffed("x ** 3"), "3 * x ** 2");
        assert_eq!(diffed("x"), "1");
    }

    #[test]
    fn sum_and_product() {
        assert_eq!(diffed("x ** 2 + x"), "2 * x + 1");
        assert_eq!(diffed("3 * x"), "3");
    }

    #[test]
    fn chain_rule() {
        assert_eq!(diffed("sin(x)"), "cos(x)");
        assert_eq!(diffed("cos(x)"), "-sin(x)");
        assert_eq!(diffed("exp(2 * x)"), "2 * exp(2 * x)");
        assert_eq!(diffed("log(x)"), "1 / x");
    }

    #[test]
    fn unknown_functions_are_unsupported() {
        let expr = Parser::new("f(x) + 1").try_parse_full::<AstExpr>().unwrap();
        let sym = SymExpr::from_ast(&expr).unwrap();
        assert_eq!(derivative(&sym, "x"), Err(Unsupported));
    }

    #[test]
    fn constant_exponential() {
        assert_eq!(diffed("2 ** x"), "2 ** x * log(2)");
    }
}
