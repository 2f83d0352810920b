use serde::{Serialize, Serializer};
use std::fmt;

/// A Smile `BigInteger` value.
///
/// This stores the integer in the form Smile encodes it and intentionally does *not* implement any kind of
/// traditional big integer math API. Its [`Display`](fmt::Display) implementation renders the exact decimal value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct BigInteger(Vec<u8>);

impl BigInteger {
    /// Creates a `BigInteger` from its representation as a byte buffer in two's complement big-endian.
    ///
    /// An empty buffer represents zero.
    #[inline]
    pub fn from_be_bytes(buf: Vec<u8>) -> Self {
        BigInteger(buf)
    }

    /// Returns a slice containing the two's complement big-endian representation of the `BigInteger`.
    #[inline]
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the `BigInteger`, returning a byte buffer containing its two's complement big-endian representation.
    #[inline]
    pub fn into_be_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns `true` if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.first().map_or(false, |b| b & 0x80 != 0)
    }

    /// Returns the value as an `i128` if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        let negative = self.is_negative();
        let fill = if negative { 0xff } else { 0 };

        let start = self
            .0
            .iter()
            .position(|&b| b != fill)
            .unwrap_or(self.0.len());
        let significant = &self.0[start..];
        if significant.len() > 16 {
            return None;
        }

        let mut buf = [fill; 16];
        buf[16 - significant.len()..].copy_from_slice(significant);
        let v = i128::from_be_bytes(buf);
        if (v < 0) != negative {
            return None;
        }

        Some(v)
    }

    /// Returns the decimal digits of the absolute value, without sign.
    pub(crate) fn magnitude_digits(&self) -> String {
        let mut magnitude = self.0.clone();
        if self.is_negative() {
            // two's complement negation
            for b in &mut magnitude {
                *b = !*b;
            }
            for b in magnitude.iter_mut().rev() {
                let (v, carry) = b.overflowing_add(1);
                *b = v;
                if !carry {
                    break;
                }
            }
        }

        // base 10^9 limbs, least significant first
        let mut limbs = vec![];
        let mut start = 0;
        loop {
            while start < magnitude.len() && magnitude[start] == 0 {
                start += 1;
            }
            if start == magnitude.len() {
                break;
            }

            let mut rem = 0u64;
            for b in &mut magnitude[start..] {
                let cur = rem << 8 | u64::from(*b);
                *b = (cur / 1_000_000_000) as u8;
                rem = cur % 1_000_000_000;
            }
            limbs.push(rem as u32);
        }

        let mut digits = match limbs.pop() {
            Some(top) => top.to_string(),
            None => return "0".to_string(),
        };
        for limb in limbs.iter().rev() {
            digits.push_str(&format!("{:09}", limb));
        }
        digits
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str(&self.magnitude_digits())
    }
}

impl Serialize for BigInteger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_i128() {
            Some(v) if v >= i128::from(i64::MIN) && v <= i128::from(i64::MAX) => {
                serializer.serialize_i64(v as i64)
            }
            Some(v) => serializer.serialize_i128(v),
            None => serializer.collect_str(self),
        }
    }
}
