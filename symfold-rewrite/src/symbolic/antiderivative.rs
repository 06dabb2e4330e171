//! Symbolic integration.
//!
//! Coverage is the polynomial/power fragment plus linear substitution into the known functions:
//! constants, powers of the variable (including the logarithmic `x^-1` case), sums, constant
//! multiples, and `sin` / `cos` / `exp` / `log` / `sqrt` with a linear argument. Products of
//! variable-dependent factors are expanded and retried. Everything else is unsupported. The
//! constant of integration is omitted throughout.

use crate::primitive::int;
use rug::Rational;
use super::expr::{Primary, SymExpr};
use super::simplify::{expand, fraction::make_fraction};
use super::Unsupported;

/// Builds a single-argument call expression.
fn call1(name: &str, arg: SymExpr) -> SymExpr {
    SymExpr::Primary(Primary::Call(name.to_owned(), vec![arg]))
}

/// Wraps an integer in a [`SymExpr`].
fn integer(n: i32) -> SymExpr {
    SymExpr::Primary(Primary::Integer(int(n)))
}

/// Divides the numerator by the denominator, skipping the division entirely when the
/// denominator is the integer 1.
fn divide(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    if denominator.as_integer().map(|n| n == &1).unwrap_or(false) {
        numerator
    } else {
        make_fraction(numerator, denominator)
    }
}

/// Converts a rational number into its canonical expression form.
fn rational_expr(value: &Rational) -> SymExpr {
    if value.denom() == &1 {
        SymExpr::Primary(Primary::Integer(value.numer().clone()))
    } else {
        make_fraction(
            SymExpr::Primary(Primary::Integer(value.numer().clone())),
            SymExpr::Primary(Primary::Integer(value.denom().clone())),
        )
    }
}

/// Reads a rational number out of a canonical exponent expression: an integer, an integer
/// reciprocal, or an integer times an integer reciprocal.
fn rational_of(expr: &SymExpr) -> Option<Rational> {
    if let Some(n) = expr.as_integer() {
        return Some(Rational::from(n));
    }
    if let Some(den) = expr.as_integer_recip() {
        return Some(Rational::from((int(1), den.clone())));
    }
    if let SymExpr::Mul(factors) = expr {
        let mut numer = None;
        let mut denom = None;
        for factor in factors {
            if numer.is_none() && factor.is_integer() {
                numer = factor.as_integer().cloned();
            } else if denom.is_none() && factor.is_integer_recip() {
                denom = factor.as_integer_recip().cloned();
            } else {
                return None;
            }
        }
        if let (Some(numer), Some(denom)) = (numer, denom) {
            return Some(Rational::from((numer, denom)));
        }
    }
    None
}

/// If the expression is linear in the variable (`a*x + b` with constant `a` and `b`), returns
/// the coefficient `a`.
fn linear_coeff(expr: &SymExpr, with: &str) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if sym == with => Some(integer(1)),
        SymExpr::Mul(factors) => {
            let mut coeff = Vec::new();
            let mut seen_variable = false;
            for factor in factors {
                if factor.as_symbol() == Some(with) && !seen_variable {
                    seen_variable = true;
                } else if !factor.contains_symbol(with) {
                    coeff.push(factor.clone());
                } else {
                    return None;
                }
            }
            seen_variable.then(|| SymExpr::Mul(coeff).downgrade())
        },
        SymExpr::Add(terms) => {
            let mut total: Option<SymExpr> = None;
            for term in terms {
                if !term.contains_symbol(with) {
                    continue;
                }
                let coeff = linear_coeff(term, with)?;
                total = Some(match total {
                    None => coeff,
                    Some(total) => total + coeff,
                });
            }
            total
        },
        _ => None,
    }
}

/// Integrates a power of the variable (or of something linear in it).
fn integrate_power(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, Unsupported> {
    if exp.contains_symbol(with) {
        // ∫ a^x dx = a^x / log(a)
        if !base.contains_symbol(with) && exp.as_symbol() == Some(with) {
            return Ok(divide(
                SymExpr::Exp(Box::new(base.clone()), Box::new(exp.clone())),
                call1("log", base.clone()),
            ));
        }
        return Err(Unsupported);
    }

    let n = rational_of(exp).ok_or(Unsupported)?;
    let linear = linear_coeff(base, with).ok_or(Unsupported)?;

    if n == -1 {
        // ∫ (a*x + b)^-1 dx = log(a*x + b) / a
        return Ok(divide(call1("log", base.clone()), linear));
    }

    // ∫ (a*x + b)^n dx = (a*x + b)^(n+1) / (a * (n+1))
    let one_more = Rational::from(&n + &Rational::from(1));
    Ok(divide(
        SymExpr::Exp(Box::new(base.clone()), Box::new(rational_expr(&one_more))),
        linear * rational_expr(&one_more),
    ))
}

/// Integrates a call to a known function with a linear argument.
fn integrate_call(name: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, Unsupported> {
    let [arg] = args else { return Err(Unsupported) };
    let linear = linear_coeff(arg, with).ok_or(Unsupported)?;

    match name {
        // ∫ sin(u) = -cos(u) / a
        "sin" => Ok(divide(integer(-1) * call1("cos", arg.clone()), linear)),
        // ∫ cos(u) = sin(u) / a
        "cos" => Ok(divide(call1("sin", arg.clone()), linear)),
        // ∫ exp(u) = exp(u) / a
        "exp" => Ok(divide(call1("exp", arg.clone()), linear)),
        // ∫ log(x) = x*log(x) - x, for the plain variable only
        "log" if arg.as_symbol() == Some(with) => Ok(
            arg.clone() * call1("log", arg.clone())
                + integer(-1) * arg.clone()
        ),
        // ∫ sqrt(u) = (2/3) * u^(3/2) / a
        "sqrt" => {
            let three_halves = Rational::from((3, 2));
            Ok(divide(
                integer(2) * SymExpr::Exp(Box::new(arg.clone()), Box::new(rational_expr(&three_halves))),
                integer(3) * linear,
            ))
        },
        _ => Err(Unsupported),
    }
}

/// Produces the antiderivative of the given expression with respect to the given symbol,
/// without the constant of integration.
///
/// No simplification is performed; the caller is expected to run the result through the
/// optimization pipeline.
pub fn antiderivative(f: &SymExpr, with: &str) -> Result<SymExpr, Unsupported> {
    // ∫ c dx = c*x
    if !f.contains_symbol(with) {
        return Ok(f.clone() * SymExpr::Primary(Primary::Symbol(with.to_owned())));
    }

    match f {
        // ∫ x dx = x^2 / 2
        SymExpr::Primary(Primary::Symbol(_)) => Ok(make_fraction(
            SymExpr::Exp(Box::new(f.clone()), Box::new(integer(2))),
            integer(2),
        )),
        SymExpr::Primary(Primary::Call(name, args)) => integrate_call(name, args, with),
        SymExpr::Primary(_) => Err(Unsupported),
        SymExpr::Add(terms) => {
            let mut sum = Vec::new();
            for term in terms {
                sum.push(antiderivative(term, with)?);
            }
            Ok(SymExpr::Add(sum).downgrade())
        },
        SymExpr::Mul(factors) => {
            let (constant, variable): (Vec<SymExpr>, Vec<SymExpr>) = factors.iter()
                .cloned()
                .partition(|factor| !factor.contains_symbol(with));

            if let [inner] = variable.as_slice() {
                // constant multiple rule
                return Ok(SymExpr::Mul(constant).downgrade() * antiderivative(inner, with)?);
            }

            // a product of variable-dependent factors: multiply it out and try again
            let expanded = expand(f);
            if &expanded != f {
                antiderivative(&expanded, with)
            } else {
                Err(Unsupported)
            }
        },
        SymExpr::Exp(base, exp) => integrate_power(base, exp, with),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::Parser;
    use symfold_parser::parser::ast::expr::Expr as AstExpr;

    /// Parses, integrates with respect to `x`, and renders the given expression.
    fn integrated(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let sym = SymExpr::from_ast(&expr).unwrap();
        antiderivative(&sym, "x").unwrap().to_string()
    }

    #[test]
    fn constants() {
        assert_eq!(integrated("6"), "6 * x");
        assert_eq!(integrated("y"), "x * y");
    }

    #[test]
    fn powers() {
        assert_eq!(integrated("x"), "x ** 2 / 2");
        assert_eq!(integrated("x ** 2"), "x ** 3 / 3");
        assert_eq!(integrated("1 / x"), "log(x)");
    }

    #[test]
    fn constant_multiples() {
        assert_eq!(integrated("2 * x"), "2 * x ** 2 / 2");
    }

    #[test]
    fn sums() {
        assert_eq!(integrated("x + 1"), "x ** 2 / 2 + x");
    }

    #[test]
    fn known_functions() {
        assert_eq!(integrated("cos(x)"), "sin(x)");
        assert_eq!(integrated("sin(2 * x)"), "-cos(2 * x) / 2");
        assert_eq!(integrated("exp(x)"), "exp(x)");
        assert_eq!(integrated("log(x)"), "x * log(x) - x");
    }

    #[test]
    fn products_expand_first() {
        assert_eq!(integrated("x * (x + 1)"), "x ** 3 / 3 + x ** 2 / 2");
    }

    #[test]
    fn unsupported_shapes() {
        let check = |input: &str| {
            let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
            let sym = SymExpr::from_ast(&expr).unwrap();
            antiderivative(&sym, "x")
        };
        assert_eq!(check("f(x)"), Err(Unsupported));
        assert_eq!(check("x ** x"), Err(Unsupported));
        assert_eq!(check("sin(x ** 2)"), Err(Unsupported));
    }
}
