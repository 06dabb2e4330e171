//! Polynomial factorization over the rationals.
//!
//! [`factor`] expands its input, pulls the rational content and any common atom powers out of
//! the resulting sum, and then factors the remaining polynomial — provided it is univariate in a
//! single *atom*, where an atom is a symbol or an opaque call. Linear factors are found with the
//! rational-root theorem and divided out with their multiplicities; whatever remains (a
//! polynomial with no rational roots) is kept in expanded form. `(x+2)*(x+2)` becomes
//! `(x+2)^2`, `2x^2 - 2` becomes `2*(x-1)*(x+1)`, and `x^2/2 + x` becomes `x*(x+2)/2`.
//!
//! Expressions containing floats are returned in expanded form unchanged, as are polynomials
//! whose leading or trailing coefficients do not fit in a `u64` (the range of the divisor
//! enumeration). Factorizations consisting only of higher-degree irreducibles (no rational
//! roots anywhere, e.g. `x^4 + 3x^2 + 2`) are not found.

use crate::primitive::int;
use rug::{Integer, Rational};
use std::collections::BTreeMap;
use super::expr::{Primary, SymExpr};
use super::simplify::expand;

/// Factors the given expression over the rationals.
///
/// The result is semantically equal to the input; when nothing can be factored, it is the
/// expanded form of the input.
pub fn factor(expr: &SymExpr) -> SymExpr {
    let expanded = expand(expr);
    match &expanded {
        SymExpr::Add(terms) => factor_sum(terms).unwrap_or(expanded),
        _ => expanded,
    }
}

/// A term of an expanded sum, decomposed into a rational coefficient and a set of atom powers.
struct Term {
    coeff: Rational,
    atoms: Vec<(SymExpr, u32)>,
}

impl Term {
    /// The total degree of the term.
    fn degree(&self) -> u64 {
        self.atoms.iter().map(|(_, exp)| u64::from(*exp)).sum()
    }

    /// The exponent of the given atom in this term.
    fn exponent_of(&self, atom: &SymExpr) -> u32 {
        self.atoms.iter()
            .find(|(base, _)| base == atom)
            .map(|(_, exp)| *exp)
            .unwrap_or(0)
    }
}

/// Decomposes an expanded term into a rational coefficient times a product of atom powers.
/// Returns `None` for terms outside that shape (floats, negative or symbolic exponents).
fn decompose(term: &SymExpr) -> Option<Term> {
    let mut coeff = Rational::from(1);
    let mut atoms: Vec<(SymExpr, u32)> = Vec::new();

    let mut push_atom = |base: &SymExpr, exp: u32| {
        if let Some(entry) = atoms.iter_mut().find(|(existing, _)| existing == base) {
            entry.1 += exp;
        } else {
            atoms.push((base.clone(), exp));
        }
    };

    let factors: &[SymExpr] = match term {
        SymExpr::Mul(factors) => factors,
        other => std::slice::from_ref(other),
    };

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Integer(n)) => coeff *= n,
            SymExpr::Primary(Primary::Float(_)) => return None,
            SymExpr::Primary(_) => push_atom(factor, 1),
            SymExpr::Exp(base, exp) => {
                if let Some(den) = factor.as_integer_recip() {
                    if den.is_zero() {
                        return None;
                    }
                    coeff /= den;
                } else {
                    let exp = exp.as_integer()?.to_u32()?;
                    match &**base {
                        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => return None,
                        SymExpr::Primary(_) => push_atom(base, exp),
                        _ => return None,
                    }
                }
            },
            _ => return None,
        }
    }

    Some(Term { coeff, atoms })
}

/// The greatest common divisor of two rationals: `gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)`.
fn rational_gcd(a: &Rational, b: &Rational) -> Rational {
    let numer = a.numer().clone().gcd(b.numer());
    let denom = a.denom().clone().lcm(b.denom());
    Rational::from((numer, denom))
}

/// Converts a rational constant back into expression factors: a numerator (unless 1) and a
/// reciprocal denominator (unless 1).
fn rational_factors(value: &Rational, factors: &mut Vec<SymExpr>) {
    if value.numer() != &1 {
        factors.push(SymExpr::Primary(Primary::Integer(value.numer().clone())));
    }
    if value.denom() != &1 {
        factors.push(SymExpr::Exp(
            Box::new(SymExpr::Primary(Primary::Integer(value.denom().clone()))),
            Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
        ));
    }
}

/// Raises an expression to a positive integer power, without simplification.
fn power_of(base: SymExpr, exp: u32) -> SymExpr {
    if exp == 1 {
        base
    } else {
        SymExpr::Exp(
            Box::new(base),
            Box::new(SymExpr::Primary(Primary::Integer(int(exp)))),
        )
    }
}

/// Factors an expanded sum: content and common atom powers out front, then rational-root
/// factorization of the remaining univariate polynomial.
///
/// Returns `None` when the terms fall outside the supported shape, in which case the caller
/// keeps the expanded sum.
fn factor_sum(terms: &[SymExpr]) -> Option<SymExpr> {
    let decomposed = terms.iter().map(decompose).collect::<Option<Vec<Term>>>()?;

    // rational content, with the sign of the highest-degree term
    let mut content = decomposed.iter()
        .fold(Rational::new(), |acc, term| rational_gcd(&acc, &term.coeff));
    if content == 0 {
        return None;
    }
    let leading = decomposed.iter().max_by_key(|term| term.degree())?;
    if leading.coeff < 0 {
        content = -content;
    }

    // atoms common to every term, at their smallest exponent
    let mut common: Vec<(SymExpr, u32)> = decomposed[0].atoms.clone();
    for term in &decomposed[1..] {
        common.retain_mut(|(atom, exp)| {
            let other = term.exponent_of(atom);
            *exp = (*exp).min(other);
            other > 0
        });
    }

    // divide every term by the content and the common part
    let primitive: Vec<Term> = decomposed.into_iter()
        .map(|term| Term {
            coeff: term.coeff / &content,
            atoms: term.atoms.into_iter()
                .filter_map(|(atom, exp)| {
                    let shared = common.iter()
                        .find(|(common_atom, _)| common_atom == &atom)
                        .map(|(_, common_exp)| *common_exp)
                        .unwrap_or(0);
                    match exp - shared {
                        0 => None,
                        rest => Some((atom, rest)),
                    }
                })
                .collect(),
        })
        .collect();

    let mut out_factors: Vec<SymExpr> = Vec::new();
    for (atom, exp) in &common {
        out_factors.push(power_of(atom.clone(), *exp));
    }

    // try to interpret the primitive part as a univariate polynomial in a single atom
    let polynomial = collect_univariate(&primitive);
    let mut leftover = Rational::from(1);
    match polynomial {
        Some((atom, coeffs)) => {
            let (extra, factors) = factor_univariate(coeffs, &atom);
            leftover = extra;
            out_factors.extend(factors);
        },
        None => {
            // not univariate: keep the primitive sum as a single factor; a bare sign is not
            // worth pulling out front
            if (content == 1 || content == -1) && common.is_empty() {
                return None;
            }
            out_factors.push(rebuild_sum(&primitive));
        },
    }

    let total = content * leftover;
    let mut numeric: Vec<SymExpr> = Vec::new();
    rational_factors(&total, &mut numeric);
    numeric.extend(out_factors);
    Some(SymExpr::Mul(numeric).downgrade())
}

/// Rebuilds a sum expression from decomposed terms.
fn rebuild_sum(terms: &[Term]) -> SymExpr {
    let rebuilt = terms.iter()
        .map(|term| {
            let mut factors = Vec::new();
            rational_factors(&term.coeff, &mut factors);
            for (atom, exp) in &term.atoms {
                factors.push(power_of(atom.clone(), *exp));
            }
            SymExpr::Mul(factors).downgrade()
        })
        .collect::<Vec<_>>();
    SymExpr::Add(rebuilt).downgrade()
}

/// If every term is a power of the same single atom, returns that atom and the dense coefficient
/// vector of the polynomial, constant term first.
fn collect_univariate(terms: &[Term]) -> Option<(SymExpr, Vec<Rational>)> {
    let mut atom: Option<&SymExpr> = None;
    let mut by_degree: BTreeMap<u32, Rational> = BTreeMap::new();

    for term in terms {
        match term.atoms.as_slice() {
            [] => {
                let entry = by_degree.entry(0).or_insert_with(Rational::new);
                *entry += &term.coeff;
            },
            [(base, exp)] => {
                match atom {
                    None => atom = Some(base),
                    Some(existing) if existing == base => {},
                    Some(_) => return None,
                }
                let entry = by_degree.entry(*exp).or_insert_with(Rational::new);
                *entry += &term.coeff;
            },
            _ => return None,
        }
    }

    let atom = atom?.clone();
    let degree = *by_degree.keys().last()?;
    if degree < 2 {
        return None;
    }

    let mut coeffs = vec![Rational::new(); degree as usize + 1];
    for (exp, coeff) in by_degree {
        coeffs[exp as usize] = coeff;
    }
    Some((atom, coeffs))
}

/// Enumerates the positive divisors of `n`.
fn divisors(n: u64) -> Vec<u64> {
    let mut out = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            out.push(d);
            out.push(n / d);
        }
        d += 1;
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// Evaluates the polynomial at the given rational point, constant term first.
fn eval(coeffs: &[Rational], at: &Rational) -> Rational {
    coeffs.iter().rev()
        .fold(Rational::new(), |acc, coeff| acc * at + coeff)
}

/// Divides the polynomial by `(x - root)`, which must divide it exactly.
fn divide_out(coeffs: &[Rational], root: &Rational) -> Vec<Rational> {
    let mut quotient = vec![Rational::new(); coeffs.len() - 1];
    let mut carry = Rational::new();
    for (idx, coeff) in coeffs.iter().enumerate().rev() {
        if idx == 0 {
            break;
        }
        carry = Rational::from(coeff + &(carry * root));
        quotient[idx - 1] = carry.clone();
    }
    quotient
}

/// Rebuilds a polynomial expression from its dense coefficient vector, constant term first.
fn polynomial_expr(coeffs: &[Rational], atom: &SymExpr) -> SymExpr {
    let terms = coeffs.iter().enumerate()
        .filter(|(_, coeff)| **coeff != 0)
        .map(|(exp, coeff)| Term { coeff: coeff.clone(), atoms: match exp {
            0 => Vec::new(),
            exp => vec![(atom.clone(), exp as u32)],
        }})
        .collect::<Vec<_>>();
    rebuild_sum(&terms)
}

/// Factors a primitive univariate polynomial (integer coefficients, content 1) by its rational
/// roots. Returns the leftover rational scale and the factors, highest root first.
///
/// When no rational root exists the polynomial itself is the single factor.
fn factor_univariate(coeffs: Vec<Rational>, atom: &SymExpr) -> (Rational, Vec<SymExpr>) {
    // the candidate roots are p/q with p dividing the constant term and q the leading
    // coefficient; coefficients beyond u64 are out of range for the divisor enumeration
    let constant = coeffs.first().map(|c| c.numer().clone().abs()).and_then(|n| n.to_u64());
    let lead = coeffs.last().map(|c| c.numer().clone().abs()).and_then(|n| n.to_u64());
    let (Some(constant), Some(lead)) = (constant, lead) else {
        return (Rational::from(1), vec![polynomial_expr(&coeffs, atom)]);
    };
    if constant == 0 || lead == 0 {
        // roots at zero are factored out as common atoms before this point
        return (Rational::from(1), vec![polynomial_expr(&coeffs, atom)]);
    }

    let mut candidates: Vec<Rational> = Vec::new();
    for p in divisors(constant) {
        for q in divisors(lead) {
            let candidate = Rational::from((int(p), int(q)));
            candidates.push(-candidate.clone());
            candidates.push(candidate);
        }
    }
    candidates.sort();
    candidates.dedup();

    let mut remaining = coeffs;
    let mut roots: Vec<(Rational, u32)> = Vec::new();
    // highest roots first, so `2x^2 - 2` factors as `(x - 1) * (x + 1)`
    for candidate in candidates.into_iter().rev() {
        let mut multiplicity = 0;
        while remaining.len() > 1 && eval(&remaining, &candidate) == 0 {
            remaining = divide_out(&remaining, &candidate);
            multiplicity += 1;
        }
        if multiplicity > 0 {
            roots.push((candidate, multiplicity));
        }
    }

    if roots.is_empty() {
        return (Rational::from(1), vec![polynomial_expr(&remaining, atom)]);
    }

    // each root p/q becomes the integer-coefficient factor (q*atom - p), absorbing a factor of
    // q out of the remaining polynomial
    let mut leftover_denominator = Integer::from(1);
    let mut factors = Vec::new();
    for (root, multiplicity) in &roots {
        let p = root.numer();
        let q = root.denom();
        for _ in 0..*multiplicity {
            leftover_denominator *= q;
        }

        let variable = if q == &1 {
            atom.clone()
        } else {
            SymExpr::Primary(Primary::Integer(q.clone())) * atom.clone()
        };
        let linear = if p.is_zero() {
            variable
        } else {
            variable + SymExpr::Primary(Primary::Integer(-p.clone()))
        };
        factors.push(power_of(linear, *multiplicity));
    }

    let mut leftover = Rational::from((int(1), leftover_denominator));
    if remaining.len() == 1 {
        leftover *= &remaining[0];
    } else {
        // no further rational roots: keep the residual polynomial, scaled to integer
        // coefficients
        let residual_content = remaining.iter()
            .filter(|coeff| **coeff != 0)
            .fold(Rational::new(), |acc, coeff| rational_gcd(&acc, coeff));
        let scaled = remaining.iter()
            .map(|coeff| Rational::from(coeff / &residual_content))
            .collect::<Vec<_>>();
        leftover *= &residual_content;
        factors.push(polynomial_expr(&scaled, atom));
    }

    (leftover, factors)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::simplify::simplify;
    use symfold_parser::Parser;
    use symfold_parser::parser::ast::expr::Expr as AstExpr;

    /// Parses, simplifies, factors, and renders the given expression, mirroring the pipeline's
    /// transform order.
    fn factored(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        let sym = SymExpr::from_ast(&expr).unwrap();
        factor(&simplify(&sym)).to_string()
    }

    #[test]
    fn squares() {
        assert_eq!(factored("(x + 2) * (x + 2)"), "(x + 2) ** 2");
        assert_eq!(factored("x ** 2 + 4 * x + 4"), "(x + 2) ** 2");
    }

    #[test]
    fn content_and_distinct_roots() {
        assert_eq!(factored("(x - 1) * (2 * x + 2)"), "2 * (x - 1) * (x + 1)");
        assert_eq!(factored("2 * x ** 2 - 2"), "2 * (x - 1) * (x + 1)");
    }

    #[test]
    fn rational_content() {
        assert_eq!(factored("x ** 2 / 2 + x"), "x * (x + 2) / 2");
        assert_eq!(factored("x ** 3 / 3"), "x ** 3 / 3");
    }

    #[test]
    fn common_symbol_factor() {
        assert_eq!(factored("x * y + x"), "x * (y + 1)");
        assert_eq!(factored("2 * x + 2 * y"), "2 * (x + y)");
    }

    #[test]
    fn rational_roots() {
        assert_eq!(factored("2 * x ** 2 + x - 1"), "(x + 1) * (2 * x - 1)");
    }

    #[test]
    fn no_rational_roots() {
        assert_eq!(factored("x ** 2 + 1"), "x ** 2 + 1");
        assert_eq!(factored("x ** 2 + x + 1"), "x ** 2 + x + 1");
    }

    #[test]
    fn partial_factorization() {
        // one rational root, quadratic residual with none
        assert_eq!(factored("(x - 1) * (x ** 2 + x + 1)"), "(x - 1) * (x ** 2 + x + 1)");
    }

    #[test]
    fn opaque_calls_as_atoms() {
        assert_eq!(factored("sin(x) ** 2 + 2 * sin(x) + 1"), "(sin(x) + 1) ** 2");
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(factored("20"), "20");
        assert_eq!(factored("0"), "0");
        assert_eq!(factored("4 * x"), "4 * x");
    }

    #[test]
    fn negative_leading_content() {
        assert_eq!(factored("-2 * x - 2"), "-2 * (x + 1)");
    }
}
