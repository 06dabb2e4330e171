//! Simplification rules for expressions involving exponentiation.

use crate::primitive::{float, int};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::ops::Pow;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.as_integer().map(|n| n.is_zero()).unwrap_or(false) {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.as_integer().map(|n| n == &1).unwrap_or(false) {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.as_integer().map(|n| n == &1).unwrap_or(false) {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0` for positive integer `a`
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base_is_zero = lhs.as_integer().map(|n| n.is_zero()).unwrap_or(false);
        let exp_is_positive = rhs.as_integer()
            .map(|n| n.cmp0() == std::cmp::Ordering::Greater)
            .unwrap_or(false);
        if base_is_zero && exp_is_positive {
            Some(SymExpr::Primary(Primary::Integer(int(0))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Folds powers of numbers.
///
/// `2^3 = 8`
/// `2^-2 = 1/4` (represented as `4^-1`)
/// `2.0^2 = 4.0`
pub fn fold_numeric_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let exp = rhs.as_integer()?;

        if let Some(base) = lhs.as_integer() {
            match exp.cmp0() {
                std::cmp::Ordering::Greater => {
                    let exp = exp.to_u32()?;
                    Some(SymExpr::Primary(Primary::Integer(base.clone().pow(exp))))
                },
                // `base^-1` is the canonical reciprocal form; leave it alone
                std::cmp::Ordering::Less if exp != &-1 => {
                    let exp = (-exp.clone()).to_u32()?;
                    Some(SymExpr::Exp(
                        Box::new(SymExpr::Primary(Primary::Integer(base.clone().pow(exp)))),
                        Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
                    ))
                },
                _ => None,
            }
        } else if let SymExpr::Primary(Primary::Float(base)) = lhs {
            let exp = exp.to_i32()?;
            Some(SymExpr::Primary(Primary::Float(float(base.to_f64().powi(exp)))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::FoldNumericPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)` for integer `b` and `c`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let outer = rhs.as_integer()?;
        if let SymExpr::Exp(base, inner) = lhs {
            let inner = inner.as_integer()?;
            Some(SymExpr::Exp(
                base.clone(),
                Box::new(SymExpr::Primary(Primary::Integer(int(inner * outer)))),
            ))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| fold_numeric_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}
