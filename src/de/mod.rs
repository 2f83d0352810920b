//! Decode Smile data into JSON text, a [`Value`](crate::value::Value) tree, or a stream of [`Token`]s.
pub use crate::de::documents::Documents;
pub use crate::de::parser::Parser;
pub use crate::de::table::{ReferenceTable, TableIter, TableOverflow, DEFAULT_CAPACITY};
pub use crate::de::token::{Header, Token};
use crate::emit::{Emitter, JsonWriter};
use crate::value::{Value, ValueBuilder};
use crate::Error;
use std::io::{Read, Write};

mod documents;
mod key;
mod parser;
mod read;
mod table;
mod token;

/// The default maximum nesting depth of objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// The default maximum length in bytes of a big integer or big decimal's unscaled value.
///
/// This is large enough for any 1000 digit number.
pub const DEFAULT_MAX_NUMBER_LEN: usize = 416;

/// Decodes a Smile document into JSON text using default decoder settings.
pub fn decode(input: &[u8]) -> Result<Document, Error> {
    Decoder::new().decode(input)
}

/// Decodes a Smile document as JSON text into the IO stream using default decoder settings.
///
/// Returns the number of input bytes consumed.
pub fn decode_to_writer<W>(input: &[u8], writer: W) -> Result<usize, Error>
where
    W: Write,
{
    Decoder::new().decode_to_writer(input, writer)
}

/// Reads a Smile document from the IO stream and decodes it into JSON text using default decoder settings.
pub fn decode_reader<R>(reader: R) -> Result<Document, Error>
where
    R: Read,
{
    Decoder::new().decode_reader(reader)
}

/// Decodes a Smile document into a [`Value`] using default decoder settings.
///
/// Returns the value and the number of input bytes consumed.
pub fn decode_value(input: &[u8]) -> Result<(Value, usize), Error> {
    Decoder::new().decode_value(input)
}

/// A decoded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    json: String,
    consumed: usize,
}

impl Document {
    /// Returns the document rendered as JSON text.
    #[inline]
    pub fn json(&self) -> &str {
        &self.json
    }

    /// Consumes the `Document`, returning its JSON text.
    #[inline]
    pub fn into_json(self) -> String {
        self.json
    }

    /// Returns the number of input bytes that made up the document.
    ///
    /// A following document in the same buffer starts at this offset.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// A builder to configure a [`Decoder`].
#[derive(Debug, Clone)]
pub struct Builder {
    max_depth: usize,
    max_number_len: usize,
    table_capacity: usize,
    table_overflow: TableOverflow,
    require_header: bool,
    ascii_only: bool,
}

impl Builder {
    /// Sets the maximum nesting depth of objects and arrays.
    ///
    /// Documents nested deeper fail with an error of kind [`ErrorKind::DepthExceeded`](crate::ErrorKind).
    ///
    /// Defaults to 1000.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum length in bytes of the unscaled value of a big integer or big decimal.
    ///
    /// Longer numbers fail with an error of kind [`ErrorKind::NumberTooLong`](crate::ErrorKind). Converting a number
    /// to decimal text takes time quadratic in its length, so this bounds the cost of a single token.
    ///
    /// Defaults to 416, which holds any 1000 digit number.
    pub fn max_number_len(&mut self, max_number_len: usize) -> &mut Self {
        self.max_number_len = max_number_len;
        self
    }

    /// Sets the number of entries each shared string table holds.
    ///
    /// Defaults to 1024, the number of entries Smile back-references can address.
    pub fn table_capacity(&mut self, table_capacity: usize) -> &mut Self {
        self.table_capacity = table_capacity;
        self
    }

    /// Sets the behavior when a shared string table is full.
    ///
    /// Defaults to [`TableOverflow::Reset`].
    pub fn table_overflow(&mut self, table_overflow: TableOverflow) -> &mut Self {
        self.table_overflow = table_overflow;
        self
    }

    /// Rejects documents that do not start with a Smile header.
    ///
    /// Defaults to `false`.
    pub fn require_header(&mut self, require_header: bool) -> &mut Self {
        self.require_header = require_header;
        self
    }

    /// Escapes all non-ASCII characters in JSON output as `\uXXXX` sequences.
    ///
    /// Defaults to `false`.
    pub fn ascii_only(&mut self, ascii_only: bool) -> &mut Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Creates a new [`Decoder`].
    pub fn build(&self) -> Decoder {
        Decoder {
            max_depth: self.max_depth,
            max_number_len: self.max_number_len,
            table_capacity: self.table_capacity,
            table_overflow: self.table_overflow,
            require_header: self.require_header,
            ascii_only: self.ascii_only,
        }
    }
}

/// A configured Smile decoder.
///
/// A `Decoder` holds only settings. Every decode call creates a fresh session with empty shared string tables, so a
/// single `Decoder` can be used for any number of calls, including concurrently from multiple threads.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    pub(crate) max_depth: usize,
    pub(crate) max_number_len: usize,
    pub(crate) table_capacity: usize,
    pub(crate) table_overflow: TableOverflow,
    pub(crate) require_header: bool,
    pub(crate) ascii_only: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::builder().build()
    }
}

impl Decoder {
    /// Returns a builder used to configure a `Decoder`.
    pub fn builder() -> Builder {
        Builder {
            max_depth: DEFAULT_MAX_DEPTH,
            max_number_len: DEFAULT_MAX_NUMBER_LEN,
            table_capacity: DEFAULT_CAPACITY,
            table_overflow: TableOverflow::Reset,
            require_header: false,
            ascii_only: false,
        }
    }

    /// Creates a `Decoder` with default settings.
    pub fn new() -> Self {
        Decoder::default()
    }

    /// Creates a [`Parser`] over the first document in the input.
    pub fn parser<'a>(&self, input: &'a [u8]) -> Parser<'a> {
        Parser::new(input, *self)
    }

    /// Decodes the first document in the input, feeding its tokens to an [`Emitter`].
    ///
    /// Returns the number of input bytes consumed. On error the emitter may have seen a prefix of the document.
    pub fn decode_with<'a, E>(&self, input: &'a [u8], emitter: &mut E) -> Result<usize, Error>
    where
        E: Emitter<'a> + ?Sized,
    {
        let mut parser = self.parser(input);
        while let Some(token) = parser.next_token()? {
            let offset = parser.offset();
            emitter.emit(token).map_err(|e| Error::io(e, offset))?;
        }
        Ok(parser.offset())
    }

    /// Decodes the first document in the input into JSON text.
    pub fn decode(&self, input: &[u8]) -> Result<Document, Error> {
        let mut buf = vec![];
        let consumed = self.decode_to_writer(input, &mut buf)?;
        // the writer only ever emits validated UTF-8
        let json = String::from_utf8(buf).map_err(|_| Error::invalid_utf8(consumed))?;
        Ok(Document { json, consumed })
    }

    /// Reads the IO stream to its end and decodes the first document in it into JSON text.
    ///
    /// Read failures are reported as errors of kind [`ErrorKind::Io`](crate::ErrorKind) at the number of bytes
    /// read before the failure.
    pub fn decode_reader<R>(&self, mut reader: R) -> Result<Document, Error>
    where
        R: Read,
    {
        let mut buf = vec![];
        if let Err(e) = reader.read_to_end(&mut buf) {
            return Err(Error::io(e, buf.len()));
        }
        self.decode(&buf)
    }

    /// Decodes the first document in the input as JSON text into the IO stream.
    ///
    /// Returns the number of input bytes consumed. On error the stream may contain a prefix of the output.
    pub fn decode_to_writer<W>(&self, input: &[u8], writer: W) -> Result<usize, Error>
    where
        W: Write,
    {
        let mut writer = JsonWriter::new(writer).ascii_only(self.ascii_only);
        let consumed = self.decode_with(input, &mut writer)?;
        writer.flush().map_err(|e| Error::io(e, consumed))?;
        Ok(consumed)
    }

    /// Decodes the first document in the input into a [`Value`].
    ///
    /// Returns the value and the number of input bytes consumed.
    pub fn decode_value(&self, input: &[u8]) -> Result<(Value, usize), Error> {
        let mut builder = ValueBuilder::new();
        let consumed = self.decode_with(input, &mut builder)?;
        Ok((builder.finish().unwrap_or(Value::Null), consumed))
    }

    /// Returns an iterator decoding back-to-back documents from the input.
    pub fn documents<'a>(&self, input: &'a [u8]) -> Documents<'a> {
        Documents::new(*self, input)
    }
}
