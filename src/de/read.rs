use crate::Error;
use memchr::memchr;
use std::convert::TryFrom;

/// A bounds-checked reader over a slice of Smile data.
///
/// Reads never go past the end of the slice; running out of input produces an
/// `EOF while parsing a value` error carrying the offset where more bytes were needed.
pub(crate) struct Cursor<'a> {
    slice: &'a [u8],
    index: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(slice: &'a [u8]) -> Self {
        Cursor { slice, index: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.slice[self.index..]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.slice.get(self.index).copied()
    }

    #[inline]
    pub fn consume(&mut self) {
        if self.index < self.slice.len() {
            self.index += 1;
        }
    }

    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        match self.peek() {
            Some(b) => {
                self.index += 1;
                Ok(b)
            }
            None => Err(Error::eof_while_parsing_value(self.index)),
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let s = self.remaining();
        if n <= s.len() {
            self.index += n;
            Ok(&s[..n])
        } else {
            Err(Error::eof_while_parsing_value(self.slice.len()))
        }
    }

    /// Reads up to the next `end` byte, consuming but not returning the marker.
    pub fn read_until(&mut self, end: u8) -> Result<&'a [u8], Error> {
        let s = self.remaining();
        match memchr(end, s) {
            Some(end) => {
                self.index += end + 1;
                Ok(&s[..end])
            }
            None => Err(Error::eof_while_parsing_value(self.slice.len())),
        }
    }

    pub fn read_vint(&mut self, byte_limit: usize) -> Result<u64, Error> {
        let start = self.index;
        let mut value = 0u64;
        for _ in 0..byte_limit {
            let byte = self.read_byte()?;
            let end = byte & 0x80 != 0;

            let (shift, bits) = if end {
                (6, byte & 0x3f)
            } else {
                (7, byte & 0x7f)
            };
            if value > u64::MAX >> shift {
                return Err(Error::vint_overflow(start));
            }
            value = value << shift | u64::from(bits);

            if end {
                return Ok(value);
            }
        }

        Err(Error::unterminated_vint(start))
    }

    pub fn read_len(&mut self) -> Result<usize, Error> {
        let start = self.index;
        let len = self.read_vint(10)?;
        usize::try_from(len).map_err(|_| Error::buffer_length_overflow(start))
    }

    pub fn read_zigzag_i32(&mut self) -> Result<i32, Error> {
        let start = self.index;
        let vint = self.read_vint(5)?;
        let vint = u32::try_from(vint).map_err(|_| Error::vint_overflow(start))?;
        Ok(zigzag_i32(vint))
    }

    pub fn read_zigzag_i64(&mut self) -> Result<i64, Error> {
        let vint = self.read_vint(10)?;
        Ok(zigzag_i64(vint))
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let buf = self.read_bytes(5)?;
        let raw = u32::from(buf[0]) << 28
            | u32::from(buf[1]) << 21
            | u32::from(buf[2]) << 14
            | u32::from(buf[3]) << 7
            | u32::from(buf[4]);
        Ok(f32::from_bits(raw))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let buf = self.read_bytes(10)?;
        let raw = u64::from(buf[0]) << 63
            | u64::from(buf[1]) << 56
            | u64::from(buf[2]) << 49
            | u64::from(buf[3]) << 42
            | u64::from(buf[4]) << 35
            | u64::from(buf[5]) << 28
            | u64::from(buf[6]) << 21
            | u64::from(buf[7]) << 14
            | u64::from(buf[8]) << 7
            | u64::from(buf[9]);
        Ok(f64::from_bits(raw))
    }

    /// Reads a length-prefixed block of binary data in Smile's 7-bit "safe" encoding.
    pub fn read_7_bit_binary(&mut self) -> Result<Vec<u8>, Error> {
        let start = self.index;
        let raw_len = self.read_len()?;
        self.read_7_bit_payload(raw_len, start)
    }

    /// Reads the 7-bit encoded body of `raw_len` bytes of binary data whose length prefix started at `start`.
    pub fn read_7_bit_payload(&mut self, raw_len: usize, start: usize) -> Result<Vec<u8>, Error> {
        let chunks = raw_len / 7;
        let remainder = raw_len % 7;
        let encoded_remainder = if remainder == 0 { 0 } else { remainder + 1 };

        let encoded_len = chunks
            .checked_mul(8)
            .and_then(|v| v.checked_add(encoded_remainder))
            .ok_or_else(|| Error::buffer_length_overflow(start))?;

        // the length check happens before anything is allocated
        let encoded = self.read_bytes(encoded_len)?;
        Ok(decode_7_bit(encoded, raw_len))
    }
}

fn decode_7_bit(encoded: &[u8], raw_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw_len);

    let mut chunks = encoded.chunks_exact(8);
    for c in &mut chunks {
        out.push(c[0] << 1 | c[1] >> 6);
        out.push(c[1] << 2 | c[2] >> 5);
        out.push(c[2] << 3 | c[3] >> 4);
        out.push(c[3] << 4 | c[4] >> 3);
        out.push(c[4] << 5 | c[5] >> 2);
        out.push(c[5] << 6 | c[6] >> 1);
        out.push(c[6] << 7 | c[7]);
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        let remainder = rest.len() - 1;
        let mut buf = [0; 8];
        buf[..rest.len()].copy_from_slice(rest);

        // the last byte is annoyingly right-aligned
        buf[remainder] <<= 7 - remainder;

        for i in 0..remainder {
            out.push(buf[i] << (i + 1) | buf[i + 1] >> (6 - i));
        }
    }

    out
}

#[inline]
pub(crate) fn zigzag_i32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ (-((v & 1) as i32))
}

#[inline]
pub(crate) fn zigzag_i64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ (-((v & 1) as i64))
}
