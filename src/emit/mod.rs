//! Consumers of decoded token streams.
//!
//! [`JsonWriter`] renders tokens as JSON text and [`ValueBuilder`](crate::value::ValueBuilder) assembles them into a
//! [`Value`](crate::value::Value). Custom consumers implement [`Emitter`] and are driven by
//! [`Decoder::decode_with`](crate::de::Decoder::decode_with).
use crate::de::Token;
use std::io;

pub use crate::emit::json::JsonWriter;

mod json;

/// A sink for the tokens of a decoded document.
///
/// The decoder only ever passes well-formed token sequences: containers are balanced, and every object value is
/// preceded by exactly one field name.
pub trait Emitter<'a> {
    /// Consumes the next token of the document.
    fn emit(&mut self, token: Token<'a>) -> io::Result<()>;
}

impl<'a, E> Emitter<'a> for &mut E
where
    E: Emitter<'a> + ?Sized,
{
    #[inline]
    fn emit(&mut self, token: Token<'a>) -> io::Result<()> {
        (**self).emit(token)
    }
}
