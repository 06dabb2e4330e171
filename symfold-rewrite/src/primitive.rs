//! Construction helpers for the arbitrary-precision numeric types used by the symbolic engine.

use rug::{Float, Integer};

/// The working precision of floating-point values, in bits.
pub const FLOAT_PRECISION: u32 = 128;

/// Creates an [`Integer`] from the given value.
pub fn int(n: impl Into<Integer>) -> Integer {
    n.into()
}

/// Creates a [`Float`] with the crate's working precision from the given value.
pub fn float(value: f64) -> Float {
    Float::with_val(FLOAT_PRECISION, value)
}

/// Parses an [`Integer`] from a string of decimal digits produced by the tokenizer.
pub fn int_from_str(s: &str) -> Integer {
    s.parse().unwrap()
}

/// Parses a [`Float`] from a float literal produced by the tokenizer.
pub fn float_from_str(s: &str) -> Float {
    Float::with_val(FLOAT_PRECISION, Float::parse(s).unwrap())
}
