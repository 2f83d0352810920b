use crate::de::parser::{Parser, State};
use crate::de::token::Token;
use crate::Error;
use std::str;

impl<'a> Parser<'a> {
    fn parse_shared_key(&self, reference: usize, offset: usize) -> Result<&'a str, Error> {
        self.shared_properties
            .as_ref()
            .ok_or_else(|| Error::invalid_string_reference(offset))?
            .resolve(reference, offset)
    }

    fn parse_long_shared_key(&mut self, reference_hi: u8, offset: usize) -> Result<&'a str, Error> {
        let reference_lo = self.cursor.read_byte()?;
        let reference = usize::from(reference_hi) << 8 | usize::from(reference_lo);
        self.parse_shared_key(reference, offset)
    }

    fn intern_key(&mut self, buf: &'a [u8], offset: usize) -> Result<&'a str, Error> {
        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8(offset))?;
        if let Some(shared_properties) = &mut self.shared_properties {
            shared_properties.add(s, offset)?;
        }
        Ok(s)
    }

    fn parse_long_key(&mut self, offset: usize) -> Result<&'a str, Error> {
        let buf = self.cursor.read_until(0xfc)?;
        self.intern_key(buf, offset)
    }

    fn parse_short_key(&mut self, len: usize, offset: usize) -> Result<&'a str, Error> {
        let buf = self.cursor.read_bytes(len)?;
        self.intern_key(buf, offset)
    }

    /// Parses a token in field name position: either a name or the end of the enclosing object.
    pub(crate) fn parse_key(&mut self) -> Result<Token<'a>, Error> {
        let start = self.cursor.offset();
        let token = match self.cursor.peek() {
            Some(token) => token,
            None => return Err(self.eof_error(start)),
        };
        self.cursor.consume();

        let name = match token {
            0x00..=0x1f => return Err(Error::reserved_token(start)),
            0x20 => "",
            0x21..=0x2f => return Err(Error::reserved_token(start)),
            0x30..=0x33 => self.parse_long_shared_key(token - 0x30, start)?,
            0x34 => self.parse_long_key(start)?,
            0x35..=0x39 => return Err(Error::reserved_token(start)),
            0x3a => return Err(Error::unexpected_token(start)),
            0x3b..=0x3f => return Err(Error::reserved_token(start)),
            0x40..=0x7f => self.parse_shared_key(usize::from(token) - 0x40, start)?,
            0x80..=0xbf => self.parse_short_key(usize::from(token) - (0x80 - 1), start)?,
            0xc0..=0xf7 => self.parse_short_key(usize::from(token) - (0xc0 - 2), start)?,
            0xf8 | 0xfa => return Err(Error::unexpected_token(start)),
            0xf9 => return Err(Error::mismatched_end(start)),
            0xfb => {
                self.pop();
                return Ok(Token::EndObject);
            }
            0xfc..=0xfe => return Err(Error::reserved_token(start)),
            0xff => return Err(self.eof_error(start)),
        };

        self.state = State::ObjectValue;
        Ok(Token::FieldName(name))
    }
}
