use crate::de::read::{zigzag_i32, Cursor};
use crate::de::table::ReferenceTable;
use crate::de::token::{Header, Token};
use crate::de::Decoder;
use crate::value::{BigDecimal, BigInteger};
use crate::Error;
use std::borrow::Cow;
use std::str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Header,
    Root,
    ObjectKey,
    ObjectValue,
    ArrayValue,
    End,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Object,
    Array,
}

/// A pull parser producing the [`Token`]s of a single Smile document.
///
/// Each parser is one decode session: it owns the shared string tables and the nesting stack, which start out empty
/// and are never reused. Tokens are produced lazily by [`Parser::next_token`]; once the root value is complete the
/// parser consumes an optional end-of-stream marker and returns `None`. Any further input is left for a following
/// document.
///
/// A parser is created with [`Decoder::parser`].
pub struct Parser<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) state: State,
    pub(crate) stack: Vec<Container>,
    pub(crate) shared_properties: Option<ReferenceTable<'a>>,
    pub(crate) shared_strings: Option<ReferenceTable<'a>>,
    header: Option<Header>,
    config: Decoder,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a [u8], config: Decoder) -> Self {
        Parser {
            cursor: Cursor::new(input),
            state: State::Header,
            stack: vec![],
            shared_properties: None,
            shared_strings: None,
            header: None,
            config,
        }
    }

    /// Returns the next token of the document, or `None` once the document is complete.
    ///
    /// After an error has been returned the parser produces no further tokens.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, Error> {
        let r = self.step();
        if r.is_err() {
            self.state = State::Failed;
        }
        r
    }

    /// Returns the number of input bytes consumed so far.
    ///
    /// Once [`Parser::next_token`] has returned `None` this is the length of the document, including its header and
    /// end-of-stream marker if present.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Returns the number of currently open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the document's header, if it had one and it has been read.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Returns the shared field name table, or `None` if field name sharing is disabled.
    pub fn field_names(&self) -> Option<&ReferenceTable<'a>> {
        self.shared_properties.as_ref()
    }

    /// Returns the shared string value table, or `None` if string value sharing is disabled.
    pub fn shared_strings(&self) -> Option<&ReferenceTable<'a>> {
        self.shared_strings.as_ref()
    }

    /// Returns `true` once the root value and any end-of-stream marker have been consumed.
    pub fn is_done(&self) -> bool {
        self.state == State::End
    }

    fn step(&mut self) -> Result<Option<Token<'a>>, Error> {
        if self.state == State::Header {
            self.read_header()?;
        }

        let token = match self.state {
            State::End | State::Failed => return Ok(None),
            State::ObjectKey => self.parse_key()?,
            State::Header | State::Root | State::ObjectValue | State::ArrayValue => {
                self.parse_value()?
            }
        };
        Ok(Some(token))
    }

    fn read_header(&mut self) -> Result<(), Error> {
        let start = self.cursor.offset();

        if self.cursor.peek() != Some(b':') {
            if self.config.require_header {
                return Err(Error::missing_header(start));
            }

            log::debug!("no Smile header, decoding raw tokens");
            self.shared_properties = Some(self.new_table());
            self.state = State::Root;
            return Ok(());
        }

        let buf = self.cursor.remaining();
        for (i, &expected) in b":)\n".iter().enumerate() {
            match buf.get(i) {
                Some(&b) if b == expected => {}
                Some(_) => return Err(Error::invalid_header(start)),
                None => return Err(Error::eof_while_parsing_header(start + buf.len())),
            }
        }

        let info = *buf
            .get(3)
            .ok_or_else(|| Error::eof_while_parsing_header(start + buf.len()))?;
        let header = Header::from_info(info);
        if header.version != 0 {
            return Err(Error::unsupported_version(start + 3));
        }
        self.cursor.read_bytes(4)?;

        log::debug!(
            "Smile header: version {}, shared names {}, shared values {}, raw binary {}",
            header.version,
            header.shared_properties,
            header.shared_strings,
            header.raw_binary,
        );

        if header.shared_properties {
            self.shared_properties = Some(self.new_table());
        }
        if header.shared_strings {
            self.shared_strings = Some(self.new_table());
        }
        self.header = Some(header);
        self.state = State::Root;

        Ok(())
    }

    fn new_table(&self) -> ReferenceTable<'a> {
        ReferenceTable::new(self.config.table_capacity, self.config.table_overflow)
    }

    /// The error for a stream that ends at a token boundary.
    pub(crate) fn eof_error(&self, offset: usize) -> Error {
        match self.stack.last() {
            None => Error::eof_while_parsing_value(offset),
            Some(Container::Array) => Error::eof_while_parsing_array(offset),
            Some(Container::Object) => Error::eof_while_parsing_map(offset),
        }
    }

    fn push(&mut self, container: Container, offset: usize) -> Result<(), Error> {
        if self.stack.len() >= self.config.max_depth {
            return Err(Error::recursion_limit_exceeded(offset));
        }

        self.stack.push(container);
        self.state = match container {
            Container::Object => State::ObjectKey,
            Container::Array => State::ArrayValue,
        };
        Ok(())
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
        self.value_complete();
    }

    pub(crate) fn value_complete(&mut self) {
        self.state = match self.stack.last() {
            Some(Container::Object) => State::ObjectKey,
            Some(Container::Array) => State::ArrayValue,
            None => {
                if self.cursor.peek() == Some(0xff) {
                    self.cursor.consume();
                }
                log::debug!("Smile document complete after {} bytes", self.cursor.offset());
                State::End
            }
        };
    }

    fn parse_shared_string(&self, reference: usize, offset: usize) -> Result<&'a str, Error> {
        self.shared_strings
            .as_ref()
            .ok_or_else(|| Error::invalid_string_reference(offset))?
            .resolve(reference, offset)
    }

    fn parse_long_shared_string(&mut self, reference_hi: u8, offset: usize) -> Result<&'a str, Error> {
        let reference_lo = self.cursor.read_byte()?;
        let reference = usize::from(reference_hi) << 8 | usize::from(reference_lo);
        self.parse_shared_string(reference, offset)
    }

    fn parse_short_string(&mut self, len: usize, offset: usize) -> Result<&'a str, Error> {
        let buf = self.cursor.read_bytes(len)?;
        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8(offset))?;
        if let Some(shared_strings) = &mut self.shared_strings {
            shared_strings.add(s, offset)?;
        }
        Ok(s)
    }

    fn parse_long_string(&mut self, offset: usize) -> Result<&'a str, Error> {
        let buf = self.cursor.read_until(0xfc)?;
        str::from_utf8(buf).map_err(|_| Error::invalid_utf8(offset))
    }

    fn parse_raw_binary(&mut self) -> Result<&'a [u8], Error> {
        let len = self.cursor.read_len()?;
        self.cursor.read_bytes(len)
    }

    fn parse_big_integer(&mut self, offset: usize) -> Result<BigInteger, Error> {
        let start = self.cursor.offset();
        let len = self.cursor.read_len()?;
        // checked before anything is read or allocated
        if len > self.config.max_number_len {
            return Err(Error::number_too_long(offset));
        }
        let buf = self.cursor.read_7_bit_payload(len, start)?;
        Ok(BigInteger::from_be_bytes(buf))
    }

    fn parse_big_decimal(&mut self, offset: usize) -> Result<BigDecimal, Error> {
        let scale = self.cursor.read_zigzag_i32()?;
        let value = self.parse_big_integer(offset)?;
        Ok(BigDecimal::new(value, scale))
    }

    fn parse_value(&mut self) -> Result<Token<'a>, Error> {
        let start = self.cursor.offset();
        let token = match self.cursor.peek() {
            Some(token) => token,
            None => return Err(self.eof_error(start)),
        };
        self.cursor.consume();

        let value = match token {
            0x00 => return Err(Error::reserved_token(start)),
            0x01..=0x1f => Token::String(self.parse_shared_string(usize::from(token) - 1, start)?),
            0x20 => Token::String(""),
            0x21 => Token::Null,
            0x22 => Token::Bool(false),
            0x23 => Token::Bool(true),
            0x24 => Token::Integer(self.cursor.read_zigzag_i32()?),
            0x25 => Token::Long(self.cursor.read_zigzag_i64()?),
            0x26 => Token::BigInteger(self.parse_big_integer(start)?),
            0x27 => return Err(Error::reserved_token(start)),
            0x28 => Token::Float(self.cursor.read_f32()?),
            0x29 => Token::Double(self.cursor.read_f64()?),
            0x2a => Token::BigDecimal(self.parse_big_decimal(start)?),
            0x2b..=0x3f => return Err(Error::reserved_token(start)),
            0x40..=0x5f => Token::String(self.parse_short_string(usize::from(token) - (0x40 - 1), start)?),
            0x60..=0x7f => Token::String(self.parse_short_string(usize::from(token) - (0x60 - 33), start)?),
            0x80..=0x9f => Token::String(self.parse_short_string(usize::from(token) - (0x80 - 2), start)?),
            0xa0..=0xbf => Token::String(self.parse_short_string(usize::from(token) - (0xa0 - 34), start)?),
            0xc0..=0xdf => Token::Integer(zigzag_i32(u32::from(token) - 0xc0)),
            0xe0 | 0xe4 => Token::String(self.parse_long_string(start)?),
            0xe1..=0xe3 | 0xe5..=0xe7 => return Err(Error::reserved_token(start)),
            0xe8 => Token::Binary(Cow::Owned(self.cursor.read_7_bit_binary()?)),
            0xe9..=0xeb => return Err(Error::reserved_token(start)),
            0xec..=0xef => Token::String(self.parse_long_shared_string(token - 0xec, start)?),
            0xf0..=0xf7 => return Err(Error::reserved_token(start)),
            0xf8 => {
                self.push(Container::Array, start)?;
                return Ok(Token::StartArray);
            }
            0xf9 => {
                return match self.state {
                    State::ArrayValue => {
                        self.pop();
                        Ok(Token::EndArray)
                    }
                    State::ObjectValue => Err(Error::mismatched_end(start)),
                    _ => Err(Error::unexpected_token(start)),
                };
            }
            0xfa => {
                self.push(Container::Object, start)?;
                return Ok(Token::StartObject);
            }
            0xfb => {
                return match self.state {
                    State::ArrayValue => Err(Error::mismatched_end(start)),
                    _ => Err(Error::unexpected_token(start)),
                };
            }
            0xfc => return Err(Error::unexpected_token(start)),
            0xfd => Token::Binary(Cow::Borrowed(self.parse_raw_binary()?)),
            0xfe => return Err(Error::reserved_token(start)),
            0xff => return Err(self.eof_error(start)),
        };

        self.value_complete();
        Ok(value)
    }
}
