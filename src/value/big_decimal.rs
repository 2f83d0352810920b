use crate::value::BigInteger;
use serde::{Serialize, Serializer};
use std::fmt;

/// A Smile `BigDecimal` value.
///
/// Like [`BigInteger`], this intentionally does *not* implement any kind of traditional big decimal math API. Its
/// [`Display`](fmt::Display) implementation renders the exact value as a JSON compatible number.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BigDecimal {
    value: BigInteger,
    scale: i32,
}

impl BigDecimal {
    /// Creates a `BigDecimal` from an unscaled arbitrary precision integer and a scale.
    ///
    /// The value of the decimal is `value * 10^-scale`.
    #[inline]
    pub fn new(value: BigInteger, scale: i32) -> Self {
        BigDecimal { scale, value }
    }

    /// Returns the `BigDecimal`'s unscaled value.
    #[inline]
    pub fn unscaled_value(&self) -> &BigInteger {
        &self.value
    }

    /// Consumes the `BigDecimal`, returning its unscaled value.
    #[inline]
    pub fn into_unscaled_value(self) -> BigInteger {
        self.value
    }

    /// Returns the `BigDecimal`'s scale.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_negative() {
            f.write_str("-")?;
        }

        let digits = self.value.magnitude_digits();
        let scale = i64::from(self.scale);
        let exponent = digits.len() as i64 - 1 - scale;

        if scale == 0 {
            return f.write_str(&digits);
        }

        // plain notation as long as it stays within a handful of leading zeros
        if scale > 0 && exponent >= -6 {
            let point = digits.len() as i64 - scale;
            if point > 0 {
                let (int, frac) = digits.split_at(point as usize);
                return write!(f, "{}.{}", int, frac);
            }
            f.write_str("0.")?;
            for _ in 0..-point {
                f.write_str("0")?;
            }
            return f.write_str(&digits);
        }

        let (first, rest) = digits.split_at(1);
        f.write_str(first)?;
        if !rest.is_empty() {
            write!(f, ".{}", rest)?;
        }
        write!(f, "e{}", exponent)
    }
}

impl Serialize for BigDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
