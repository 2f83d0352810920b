use crate::value::{BigDecimal, BigInteger};
use std::borrow::Cow;

/// A single decoded unit of a Smile document.
///
/// Strings and raw binary values borrow from the input; 7-bit encoded binary data has to be unpacked and is owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// The start of an object.
    StartObject,
    /// The end of an object.
    EndObject,
    /// The start of an array.
    StartArray,
    /// The end of an array.
    EndArray,
    /// The name of the next object field.
    FieldName(&'a str),
    /// A null value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 32 bit integer value.
    Integer(i32),
    /// A 64 bit integer value.
    Long(i64),
    /// An arbitrary precision integer value.
    BigInteger(BigInteger),
    /// A 32 bit floating point value.
    Float(f32),
    /// A 64 bit floating point value.
    Double(f64),
    /// An arbitrary precision decimal value.
    BigDecimal(BigDecimal),
    /// A string value.
    String(&'a str),
    /// A binary value.
    Binary(Cow<'a, [u8]>),
}

/// The contents of a Smile header.
///
/// Documents without a header behave as if shared field names were enabled and every other feature disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub(crate) version: u8,
    pub(crate) shared_properties: bool,
    pub(crate) shared_strings: bool,
    pub(crate) raw_binary: bool,
}

impl Header {
    pub(crate) fn from_info(info: u8) -> Self {
        Header {
            version: info >> 4,
            shared_properties: info & 0x01 != 0,
            shared_strings: info & 0x02 != 0,
            raw_binary: info & 0x04 != 0,
        }
    }

    /// Returns the format version. Only version 0 is supported.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns `true` if field names may be back-referenced.
    pub fn shared_properties(&self) -> bool {
        self.shared_properties
    }

    /// Returns `true` if short string values may be back-referenced.
    pub fn shared_strings(&self) -> bool {
        self.shared_strings
    }

    /// Returns `true` if the encoder may have written raw binary data.
    pub fn raw_binary(&self) -> bool {
        self.raw_binary
    }
}
