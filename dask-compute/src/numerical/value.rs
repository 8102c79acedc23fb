use std::{cmp::Ordering, fmt::{Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest magnitude at which every `f64` integer is still exactly representable as an
/// `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The value of an expression.
///
/// Values are normalized on construction: a finite, integral result is always stored as
/// [`Value::Integer`], so that `(4/2)` and `2` produce equal values and display the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// An integer value.
    Integer(i64),

    /// A floating-point value with a fractional part.
    Float(f64),
}

impl Value {
    /// Creates a value from the given number. Returns [`None`] if the number is not finite.
    pub fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }

        if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
            // `-0.0 as i64` is `0`
            Some(Value::Integer(n as i64))
        } else {
            Some(Value::Float(n))
        }
    }

    /// Returns the value as an `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Integer(n) => n as f64,
            Value::Float(n) => n,
        }
    }

    /// Compares two values numerically.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_integral_floats() {
        assert_eq!(Value::from_f64(19.0), Some(Value::Integer(19)));
        assert_eq!(Value::from_f64(-3.0), Some(Value::Integer(-3)));
        assert_eq!(Value::from_f64(-0.0), Some(Value::Integer(0)));
        assert_eq!(Value::from_f64(0.5), Some(Value::Float(0.5)));
    }

    #[test]
    fn huge_values_stay_floats() {
        assert_eq!(Value::from_f64(1e300), Some(Value::Float(1e300)));
    }

    #[test]
    fn non_finite_is_undefined() {
        assert_eq!(Value::from_f64(f64::INFINITY), None);
        assert_eq!(Value::from_f64(f64::NEG_INFINITY), None);
        assert_eq!(Value::from_f64(f64::NAN), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Integer(22).to_string(), "22");
        assert_eq!(Value::Float(0.6).to_string(), "0.6");
        assert_eq!(Value::Float(-2.25).to_string(), "-2.25");
    }

    #[test]
    fn ordering() {
        let mut values = vec![Value::Float(2.5), Value::Integer(-1), Value::Integer(3), Value::Float(0.5)];
        values.sort_by(Value::total_cmp);
        assert_eq!(values, [Value::Integer(-1), Value::Float(0.5), Value::Float(2.5), Value::Integer(3)]);
    }
}
