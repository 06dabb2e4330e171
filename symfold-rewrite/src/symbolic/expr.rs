//! A representation of arithmetic expressions that is easier to manipulate than the syntax tree.
//!
//! The [`Expr`](symfold_parser::parser::ast::expr::Expr) type from `symfold-parser` is a
//! recursive `enum` that represents the syntax of an expression. It's convenient for parsing,
//! but not so much for algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], which **flattens** out the tree structure. For
//! example, the expression `x + (y + z)` is represented internally as a single [`SymExpr::Add`]
//! node with _three_ children, `x`, `y`, and `z`. Subtraction becomes addition of a `-1`
//! multiple, and division becomes multiplication by a power of `-1`, normalizing every
//! expression into a sum of products.
//!
//! # Strict equality
//!
//! Determining whether two expressions are semantically equal is hard in general: `x^2 + 2x + 1`
//! and `(x + 1)^2` are equal, but showing it requires the very simplification machinery that
//! needs an equality check to know when it is done. To break the cycle, the [`PartialEq`]
//! implementation for [`SymExpr`] implements **strict equality**: two expressions are strictly
//! equal if they have the same shape, where the terms of [`SymExpr::Add`] and the factors of
//! [`SymExpr::Mul`] may appear in any order. Strict equality never reports false positives, is
//! cheap to compute, and requires no simplification, which makes it a usable fixed-point test
//! for the rewrite rules.
//!
//! # Rendering
//!
//! The [`Display`](std::fmt::Display) implementation renders an expression as canonical script
//! source: terms ordered by descending degree, numeric coefficients leading their products,
//! reciprocal powers rendered as `/` denominators, and `**` for exponentiation. The output is
//! always re-parseable by `symfold-parser`; this is the return half of the bridge round-trip.

use crate::primitive::{float_from_str, int, int_from_str};
use rug::{Float, Integer};
use std::{fmt, ops::{Add, AddAssign, Mul, MulAssign, Neg, Range}};
use super::simplify::fraction::make_fraction;
use symfold_parser::parser::ast::{expr::Expr as AstExpr, literal::Literal};
use symfold_parser::parser::token::op::{BinOpKind, UnaryOpKind};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x, y)`. Calls are opaque atoms: the engine
    /// rewrites their arguments but ascribes no meaning to the function itself.
    Call(String, Vec<SymExpr>),
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-normal [`Float`]s (such as `NaN`)! Report any bugs that cause this to
/// happen.
impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// An arithmetic expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference
    /// to the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        if let Self::Exp(base, exp) = self {
            if let Self::Primary(Primary::Integer(exp)) = &**exp {
                if exp == &-1 {
                    return base.as_integer();
                }
            }
        }

        None
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns the
    /// contained integer (the denominator of the fraction).
    pub fn into_integer_recip(self) -> Option<Integer> {
        if let Self::Exp(base, exp) = self {
            if matches!(*base, Self::Primary(Primary::Integer(_))) {
                if let Self::Primary(Primary::Integer(exp)) = *exp {
                    if exp == -1 {
                        return base.into_integer();
                    }
                }
            }
        }

        None
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the symbol with the given name occurs anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Self::Primary(Primary::Symbol(sym)) => sym == name,
            Self::Primary(Primary::Call(_, args)) => {
                args.iter().any(|arg| arg.contains_symbol(name))
            },
            Self::Primary(_) => false,
            Self::Add(terms) => terms.iter().any(|term| term.contains_symbol(name)),
            Self::Mul(factors) => factors.iter().any(|factor| factor.contains_symbol(name)),
            Self::Exp(base, exp) => base.contains_symbol(name) || exp.contains_symbol(name),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::Primary(Primary::Integer(int(0)))
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::Primary(Primary::Integer(int(1)))
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Converts a syntax-tree expression into a flattened [`SymExpr`].
    ///
    /// Strings, tuples, comparisons, attribute accesses, and calls whose target is not a plain
    /// name are outside the arithmetic fragment; the error carries the span of the offending
    /// node.
    pub fn from_ast(expr: &AstExpr) -> Result<Self, Range<usize>> {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(num) => Ok(Self::Primary(Primary::Integer(int_from_str(&num.value)))),
                Literal::Float(num) => Ok(Self::Primary(Primary::Float(float_from_str(&num.value)))),
                Literal::Symbol(sym) => Ok(Self::Primary(Primary::Symbol(sym.name.clone()))),
                Literal::Str(string) => Err(string.span.clone()),
            },
            AstExpr::Paren(paren) => Self::from_ast(&paren.expr),
            AstExpr::Call(call) => {
                let Some(name) = call.name() else {
                    return Err(call.span());
                };
                let args = call.args.iter()
                    .map(Self::from_ast)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Primary(Primary::Call(name.to_owned(), args)))
            },
            AstExpr::Attribute(attr) => Err(attr.span()),
            AstExpr::Tuple(tuple) => Err(tuple.span()),
            AstExpr::Compare(compare) => Err(compare.span()),
            AstExpr::Unary(unary) => {
                let operand = Self::from_ast(&unary.operand)?;
                match unary.op.kind {
                    UnaryOpKind::Neg => Ok(operand.neg()),
                    UnaryOpKind::Pos => Ok(operand),
                }
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from_ast(&bin.lhs)?;
                let rhs = Self::from_ast(&bin.rhs)?;
                Ok(match bin.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    // treat `a - b` as `a + -1 * b`
                    BinOpKind::Sub => lhs + rhs.neg(),
                    BinOpKind::Mul => lhs * rhs,
                    // treat `a / b` as `a * b^-1`
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Pow => Self::Exp(Box::new(lhs), Box::new(rhs)),
                })
            },
        }
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// Two expressions are strictly equal if:
/// - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
/// [`SymExpr::Add`], etc.).
/// - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
/// - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
/// terms / factors, in any order.
/// - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together, reusing the left-hand side's allocation where possible.
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together, reusing the left-hand side's allocation where possible.
impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

/// Estimates the polynomial degree of an expression, counting symbols and calls as degree-one
/// atoms. Only used to order terms for rendering.
fn degree(expr: &SymExpr) -> i64 {
    match expr {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => 0,
        SymExpr::Primary(_) => 1,
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or(0),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        SymExpr::Exp(base, exp) => match exp.as_integer().and_then(|n| n.to_i64()) {
            Some(n) => degree(base).saturating_mul(n),
            None => degree(base),
        },
    }
}

/// Returns true if the term carries a negative numeric sign, i.e. it is a negative number or a
/// product containing one.
fn is_negative(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) => int.cmp0() == std::cmp::Ordering::Less,
        SymExpr::Primary(Primary::Float(float)) => float.is_sign_negative() && !float.is_zero(),
        SymExpr::Mul(factors) => factors.iter().any(is_negative),
        _ => false,
    }
}

/// Strips the negative numeric sign found by [`is_negative`], dropping a bare `-1` factor
/// entirely.
fn without_sign(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) => SymExpr::Primary(Primary::Integer(int.clone().abs())),
        SymExpr::Primary(Primary::Float(float)) => SymExpr::Primary(Primary::Float(float.clone().abs())),
        SymExpr::Mul(factors) => {
            let mut factors = factors.clone();
            for factor in factors.iter_mut() {
                if is_negative(factor) {
                    *factor = without_sign(factor);
                    break;
                }
            }
            factors.retain(|factor| factor.as_integer().map(|n| n != &1).unwrap_or(true));
            SymExpr::Mul(factors).downgrade()
        },
        expr => expr.clone(),
    }
}

/// Clamps a [`rug::Integer`] into an `i64` ordering key.
fn clamp_i64(n: &Integer) -> i64 {
    n.to_i64().unwrap_or(if n.cmp0() == std::cmp::Ordering::Less { i64::MIN } else { i64::MAX })
}

/// The numeric coefficient of a term, clamped to `i64`.
fn numeric_coeff(term: &SymExpr) -> i64 {
    match term {
        SymExpr::Primary(Primary::Integer(n)) => clamp_i64(n),
        SymExpr::Mul(factors) => factors.iter()
            .filter_map(|factor| factor.as_integer())
            .map(clamp_i64)
            .product(),
        _ => 1,
    }
}

/// The constant term of a sum, clamped to `i64`.
fn constant_term(expr: &SymExpr) -> i64 {
    if let SymExpr::Add(terms) = expr {
        terms.iter()
            .filter_map(|term| term.as_integer())
            .map(clamp_i64)
            .sum()
    } else {
        0
    }
}

/// The coefficient of the highest-degree term of a sum, clamped to `i64`.
fn leading_coeff(expr: &SymExpr) -> i64 {
    if let SymExpr::Add(terms) = expr {
        terms.iter()
            .max_by_key(|term| degree(term))
            .map(numeric_coeff)
            .unwrap_or(1)
    } else {
        1
    }
}

/// Ordering key for the factors of a product: numbers first, then symbols and powers of symbols
/// by name, then calls, then other powers, then sums by leading coefficient and constant term,
/// so `2 * (x - 1) * (x + 1)` and `(x + 1) * (2 * x - 1)` come out in the expected order.
fn factor_key(expr: &SymExpr) -> (u8, i64, i64, String) {
    match expr {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => {
            (0, 0, 0, String::new())
        },
        SymExpr::Primary(Primary::Symbol(sym)) => (1, 0, 0, sym.clone()),
        SymExpr::Exp(base, _) if base.as_symbol().is_some() => {
            (1, 0, 0, base.as_symbol().unwrap().to_owned())
        },
        SymExpr::Exp(..) => (2, 0, 0, expr.to_string()),
        SymExpr::Primary(Primary::Call(..)) => (3, 0, 0, expr.to_string()),
        SymExpr::Add(_) => (4, leading_coeff(expr), constant_term(expr), expr.to_string()),
        SymExpr::Mul(_) => (5, 0, 0, expr.to_string()),
    }
}

/// Writes a single factor of a product, parenthesizing sums.
fn fmt_factor(factor: &SymExpr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if matches!(factor, SymExpr::Add(_)) {
        write!(f, "({})", factor)
    } else {
        write!(f, "{}", factor)
    }
}

/// Writes the factors of a product, separated by ` * `, in canonical order.
fn fmt_factors(factors: &[&SymExpr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut iter = factors.iter();
    if let Some(factor) = iter.next() {
        fmt_factor(factor, f)?;
        for factor in iter {
            write!(f, " * ")?;
            fmt_factor(factor, f)?;
        }
    }
    Ok(())
}

/// Writes a product, splitting negative integer powers into a `/` denominator.
fn fmt_mul(factors: &[SymExpr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut numerator: Vec<SymExpr> = Vec::new();
    let mut denominator: Vec<SymExpr> = Vec::new();

    for factor in factors {
        if let SymExpr::Exp(base, exp) = factor {
            if let Some(n) = exp.as_integer() {
                if n.cmp0() == std::cmp::Ordering::Less {
                    let power = -n.clone();
                    denominator.push(if power == 1 {
                        (**base).clone()
                    } else {
                        SymExpr::Exp(base.clone(), Box::new(SymExpr::Primary(Primary::Integer(power))))
                    });
                    continue;
                }
            }
        }
        numerator.push(factor.clone());
    }

    numerator.sort_by_key(factor_key);
    denominator.sort_by_key(factor_key);

    // a leading -1 coefficient reads better as a sign
    if numerator.len() > 1 && numerator[0].as_integer().map(|n| n == &-1).unwrap_or(false) {
        write!(f, "-")?;
        numerator.remove(0);
    }

    if numerator.is_empty() {
        write!(f, "1")?;
    } else {
        fmt_factors(&numerator.iter().collect::<Vec<_>>(), f)?;
    }

    if !denominator.is_empty() {
        write!(f, " / ")?;
        if denominator.len() > 1 {
            write!(f, "(")?;
            fmt_factors(&denominator.iter().collect::<Vec<_>>(), f)?;
            write!(f, ")")
        } else {
            fmt_factor(&denominator[0], f)
        }
    } else {
        Ok(())
    }
}

/// Writes a power expression. Negative integer exponents render as a `1 / …` fraction.
fn fmt_exp(base: &SymExpr, exp: &SymExpr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(n) = exp.as_integer() {
        if n.cmp0() == std::cmp::Ordering::Less {
            write!(f, "1 / ")?;
            let power = -n.clone();
            return if power == 1 {
                fmt_factor(base, f)
            } else {
                fmt_exp(base, &SymExpr::Primary(Primary::Integer(power)), f)
            };
        }
    }

    let base_needs_parens = match base {
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
        expr => is_negative(expr),
    };
    if base_needs_parens {
        write!(f, "({}) ** ", base)?;
    } else {
        write!(f, "{} ** ", base)?;
    }

    let exp_needs_parens = match exp {
        SymExpr::Add(_) | SymExpr::Mul(_) => true,
        expr => is_negative(expr),
    };
    if exp_needs_parens {
        write!(f, "({})", exp)
    } else {
        write!(f, "{}", exp)
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{:?}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut sorted: Vec<&SymExpr> = terms.iter().collect();
                sorted.sort_by_key(|term| {
                    (-degree(term), without_sign(term).to_string())
                });

                let mut iter = sorted.into_iter();
                if let Some(term) = iter.next() {
                    if is_negative(term) {
                        write!(f, "-{}", without_sign(term))?;
                    } else {
                        write!(f, "{}", term)?;
                    }
                    for term in iter {
                        if is_negative(term) {
                            write!(f, " - {}", without_sign(term))?;
                        } else {
                            write!(f, " + {}", term)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => fmt_mul(factors, f),
            Self::Exp(base, exp) => fmt_exp(base, exp, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::Parser;

    /// Parses the given expression and returns the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from_ast(&expr).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2 * (x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        // these are NOT strictly equal (but are semantically equal)
        let a = parse_expr("2 * (x + 1)");
        let b = parse_expr("2 * x + 2");
        assert_ne!(a, b);
    }

    #[test]
    fn flattening() {
        let expr = parse_expr("x + (y + z)");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Primary(Primary::Symbol(String::from("y"))),
            SymExpr::Primary(Primary::Symbol(String::from("z"))),
        ]));
    }

    #[test]
    fn subtraction_and_division_normalize() {
        let expr = parse_expr("x - 2");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Primary(Primary::Integer(int(-2))),
        ]));

        let expr = parse_expr("x / 3");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Symbol(String::from("x"))),
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ),
        ]));
    }

    #[test]
    fn unsupported_forms() {
        let parse = |input: &str| {
            let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
            SymExpr::from_ast(&expr)
        };
        assert!(parse("'hello' + 1").is_err());
        assert!(parse("a < b").is_err());
        assert!(parse("obj.attr + 1").is_err());
        assert!(parse("obj.method(x) + 1").is_err());
        assert!(parse("sin(x) + 1").is_ok());
    }

    #[test]
    fn render_term_order() {
        let expr = parse_expr("4 + x ** 2 + 4 * x");
        assert_eq!(expr.to_string(), "x ** 2 + 4 * x + 4");
    }

    #[test]
    fn render_subtraction() {
        let expr = parse_expr("2 * x ** 2 - 2");
        assert_eq!(expr.to_string(), "2 * x ** 2 - 2");
    }

    #[test]
    fn render_fractions() {
        let expr = parse_expr("x ** 3 / 3");
        assert_eq!(expr.to_string(), "x ** 3 / 3");

        let expr = parse_expr("1 / 4");
        assert_eq!(expr.to_string(), "1 / 4");
    }

    #[test]
    fn render_factor_order() {
        let expr = SymExpr::Mul(vec![
            parse_expr("x + 1"),
            parse_expr("2"),
            parse_expr("x - 1"),
        ]);
        assert_eq!(expr.to_string(), "2 * (x - 1) * (x + 1)");
    }

    #[test]
    fn render_powers_of_sums() {
        let expr = SymExpr::Exp(
            Box::new(parse_expr("x + 2")),
            Box::new(parse_expr("2")),
        );
        assert_eq!(expr.to_string(), "(x + 2) ** 2");
    }

    #[test]
    fn render_round_trips_through_parser() {
        for input in ["x ** 2 + 4 * x + 4", "2 * (x - 1) * (x + 1)", "x * (x + 2) / 2"] {
            let expr = parse_expr(input);
            assert_eq!(parse_expr(&expr.to_string()), expr);
        }
    }
}
