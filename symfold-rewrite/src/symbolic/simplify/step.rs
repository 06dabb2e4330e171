//! The rewrite steps that the simplification rules can report.

/// A single rewrite applied by a simplification or expansion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0 + a = a`
    AddZero,

    /// `a + a = 2a`, `2a + 3a = 5a`, etc.
    CombineLikeTerms,

    /// `0 * a = 0`
    MultiplyZero,

    /// `1 * a = a`
    MultiplyOne,

    /// `3/12 = 1/4`, `12/3 = 4`
    ReduceFraction,

    /// `a^b * a^c = a^(b+c)`, `a^c * b^c = (a*b)^c`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0` for positive integer `a`
    ZeroPower,

    /// `2^3 = 8`
    FoldNumericPower,

    /// `(a^b)^c = a^(b*c)` for integer `b` and `c`
    PowerOfPower,

    /// `a * (b + c) = a*b + a*c`
    DistributiveProperty,

    /// `(a * b)^c = a^c * b^c`
    DistributePower,

    /// `(a + b)^n` multiplied out for integer `n >= 2`
    ExpandIntegerPower,
}
