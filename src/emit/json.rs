use crate::de::Token;
use crate::emit::Emitter;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Display;
use std::io::{self, Write};

/// An [`Emitter`] writing compact JSON text to an IO stream.
///
/// Binary values are written as base64 strings and non-finite floating point values as `null`, since JSON has no
/// representation for either.
pub struct JsonWriter<W> {
    writer: W,
    first: bool,
    ascii_only: bool,
}

impl<W> JsonWriter<W>
where
    W: Write,
{
    /// Creates a new `JsonWriter`.
    pub fn new(writer: W) -> Self {
        JsonWriter {
            writer,
            first: true,
            ascii_only: false,
        }
    }

    /// Escapes all non-ASCII characters as `\uXXXX` sequences.
    ///
    /// Defaults to `false`.
    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Returns a shared reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the inner writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the `JsonWriter`, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flushes the inner writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn separator(&mut self) -> io::Result<()> {
        if self.first {
            self.first = false;
            Ok(())
        } else {
            self.writer.write_all(b",")
        }
    }

    fn write_integer<I>(&mut self, v: I) -> io::Result<()>
    where
        I: itoa::Integer,
    {
        let mut buf = itoa::Buffer::new();
        self.writer.write_all(buf.format(v).as_bytes())
    }

    fn write_float<F>(&mut self, v: F, finite: bool, large: bool) -> io::Result<()>
    where
        F: Display + std::fmt::LowerExp,
    {
        if !finite {
            return self.writer.write_all(b"null");
        }

        let s = if large {
            format!("{:e}", v)
        } else {
            v.to_string()
        };
        self.writer.write_all(s.as_bytes())?;
        if !s.bytes().any(|b| b == b'.' || b == b'e') {
            self.writer.write_all(b".0")?;
        }
        Ok(())
    }

    fn write_display<T>(&mut self, v: T) -> io::Result<()>
    where
        T: Display,
    {
        write!(self.writer, "{}", v)
    }

    fn write_binary(&mut self, v: &[u8]) -> io::Result<()> {
        self.writer.write_all(b"\"")?;
        self.writer.write_all(STANDARD.encode(v).as_bytes())?;
        self.writer.write_all(b"\"")
    }
}

impl<'a, W> Emitter<'a> for JsonWriter<W>
where
    W: Write,
{
    fn emit(&mut self, token: Token<'a>) -> io::Result<()> {
        match token {
            Token::StartObject => {
                self.separator()?;
                self.first = true;
                return self.writer.write_all(b"{");
            }
            Token::StartArray => {
                self.separator()?;
                self.first = true;
                return self.writer.write_all(b"[");
            }
            Token::EndObject => {
                self.first = false;
                return self.writer.write_all(b"}");
            }
            Token::EndArray => {
                self.first = false;
                return self.writer.write_all(b"]");
            }
            Token::FieldName(name) => {
                self.separator()?;
                write_str(&mut self.writer, name, self.ascii_only)?;
                // the value directly follows its name without a comma
                self.first = true;
                return self.writer.write_all(b":");
            }
            _ => {}
        }

        self.separator()?;
        match token {
            Token::Null => self.writer.write_all(b"null"),
            Token::Bool(true) => self.writer.write_all(b"true"),
            Token::Bool(false) => self.writer.write_all(b"false"),
            Token::Integer(v) => self.write_integer(v),
            Token::Long(v) => self.write_integer(v),
            Token::BigInteger(v) => self.write_display(v),
            Token::Float(v) => self.write_float(v, v.is_finite(), is_extreme(f64::from(v))),
            Token::Double(v) => self.write_float(v, v.is_finite(), is_extreme(v)),
            Token::BigDecimal(v) => self.write_display(v),
            Token::String(s) => write_str(&mut self.writer, s, self.ascii_only),
            Token::Binary(v) => self.write_binary(&v),
            Token::StartObject
            | Token::StartArray
            | Token::EndObject
            | Token::EndArray
            | Token::FieldName(_) => Ok(()),
        }
    }
}

// plain notation gets unwieldy outside of this range
fn is_extreme(v: f64) -> bool {
    let abs = v.abs();
    abs >= 1e16 || (abs != 0.0 && abs < 1e-6)
}

fn write_str<W>(writer: &mut W, s: &str, ascii_only: bool) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(b"\"")?;

    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        let escape: &[u8] = match c {
            '"' => b"\\\"",
            '\\' => b"\\\\",
            '\n' => b"\\n",
            '\r' => b"\\r",
            '\t' => b"\\t",
            '\u{8}' => b"\\b",
            '\u{c}' => b"\\f",
            c if (c as u32) < 0x20 || (ascii_only && !c.is_ascii()) => {
                writer.write_all(&bytes[start..i])?;
                let mut buf = [0; 2];
                for unit in c.encode_utf16(&mut buf) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
                start = i + c.len_utf8();
                continue;
            }
            _ => continue,
        };

        writer.write_all(&bytes[start..i])?;
        writer.write_all(escape)?;
        start = i + c.len_utf8();
    }
    writer.write_all(&bytes[start..])?;

    writer.write_all(b"\"")
}
