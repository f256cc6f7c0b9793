//! Functions to construct the [`Float`]s used for numeric factors.

use rug::{Assign, Float};

/// The number of digits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, if the entire slice is a valid,
/// finite number.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s.trim())
        .ok()
        .map(|parsed| Float::with_val(PRECISION, parsed))
        .filter(|num| num.is_finite())
}
