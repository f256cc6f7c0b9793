//! Shared constants used in the library. This module consists of static
//! constants that return [`Float`]s with the given value.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

pub static ZERO: Lazy<Float> = Lazy::new(|| float(0));

pub static ONE: Lazy<Float> = Lazy::new(|| float(1));
