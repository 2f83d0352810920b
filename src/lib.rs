//! A Smile to JSON decoder.
//!
//! [Smile] is a binary data format created by the developers of the Jackson serialization library for Java. It is
//! designed to be a binary equivalent of JSON. This crate decodes Smile documents into compact JSON text, into a
//! [`Value`] tree, or into a stream of [`Token`]s for custom consumers.
//!
//! # Decoder Options
//!
//! The free functions [`decode`], [`decode_to_writer`], [`decode_reader`] and [`decode_value`] use default settings. A [`Decoder`]
//! created via [`Decoder::builder`] can adjust them:
//!
//! * [`Builder::max_depth`]: The maximum nesting depth of objects and arrays. Defaults to 1000.
//! * [`Builder::max_number_len`]: The maximum length in bytes of a `BigInteger` or `BigDecimal`. Defaults to 416,
//!     enough for any 1000 digit number.
//! * [`Builder::table_capacity`] and [`Builder::table_overflow`]: The size of the shared field name and string value
//!     tables, and what happens when one of them fills up. By default each holds 1024 entries and is cleared when
//!     full, matching Jackson's encoder.
//! * [`Builder::require_header`]: Rejects documents without the `:)\n` header. Headerless documents are accepted by
//!     default, and are decoded with shared field names enabled and shared string values disabled.
//! * [`Builder::ascii_only`]: Escapes all non-ASCII characters in JSON output. Disabled by default.
//!
//! # Output Notes
//!
//! JSON has no binary type, so binary values are written as base64 strings. Non-finite floating point values are
//! written as `null`. `BigInteger` and `BigDecimal` values are written as exact decimal numbers.
//!
//! # Examples
//!
//! Decode a Smile document into JSON text:
//! ```rust
//! use smile_json::Error;
//!
//! fn main() -> Result<(), Error> {
//!     let smile = b":)\n\x01\xfa\x85number\x24\x32\x80\x85street\x52Pennsylvania Avenue\xfb";
//!
//!     let document = smile_json::decode(smile)?;
//!
//!     assert_eq!(document.json(), r#"{"number":1600,"street":"Pennsylvania Avenue"}"#);
//!     assert_eq!(document.consumed(), smile.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Decode a stream of back-to-back documents:
//! ```rust
//! use smile_json::{Decoder, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let smile = b":)\n\x00\xc2\xff:)\n\x00\xc4\xff";
//!
//!     let documents = Decoder::new()
//!         .documents(smile)
//!         .map(|r| r.map(|d| d.into_json()))
//!         .collect::<Result<Vec<_>, _>>()?;
//!
//!     assert_eq!(documents, ["1", "2"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! [Smile]: https://github.com/FasterXML/smile-format-specification
//! [`Value`]: value::Value
//! [`Token`]: de::Token
//! [`Builder::max_depth`]: de::Builder::max_depth
//! [`Builder::max_number_len`]: de::Builder::max_number_len
//! [`Builder::table_capacity`]: de::Builder::table_capacity
//! [`Builder::table_overflow`]: de::Builder::table_overflow
//! [`Builder::require_header`]: de::Builder::require_header
//! [`Builder::ascii_only`]: de::Builder::ascii_only
#![warn(missing_docs)]

#[doc(inline)]
pub use de::{decode, decode_reader, decode_to_writer, decode_value, Decoder, Document};
#[doc(inline)]
pub use error::{Error, ErrorKind};

pub mod de;
pub mod emit;
mod error;
pub mod value;
