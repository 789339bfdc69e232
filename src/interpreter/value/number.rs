use std::cmp::Ordering;

use crate::util::num::{format_real, i64_to_f64};

/// A numeric value: either an exact integer or a real.
///
/// Integers and reals compare by numeric value, so `2 == 2.0` holds.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
}

impl Number {
    /// Returns the value as an `f64`, converting integers.
    ///
    /// # Example
    /// ```
    /// use relief::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Integer(3).as_real(), 3.0);
    /// assert_eq!(Number::Real(0.5).as_real(), 0.5);
    /// ```
    #[must_use]
    pub const fn as_real(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(n),
            Self::Real(r) => r,
        }
    }

    /// Returns `true` if the value is zero (`0`, `0.0` or `-0.0`).
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Real(r) => r == 0.0,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            _ => self.as_real() == other.as_real(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            _ => self.as_real().partial_cmp(&other.as_real()),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
        }
    }
}
