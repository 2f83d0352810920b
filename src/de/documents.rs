use crate::de::{Decoder, Document};
use crate::Error;

/// An iterator that decodes a buffer holding multiple Smile documents.
///
/// Each document is decoded by its own session, starting where the previous one ended, and may carry its own header.
/// The iterator stops at the end of the input, at an end-of-stream marker between documents, or after the first
/// error. Error offsets are relative to the start of the whole buffer.
///
/// Created by [`Decoder::documents`].
pub struct Documents<'a> {
    decoder: Decoder,
    input: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(decoder: Decoder, input: &'a [u8]) -> Self {
        Documents {
            decoder,
            input,
            offset: 0,
            done: false,
        }
    }

    /// Returns the offset in the input at which the next document starts.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Documents<'_> {
    type Item = Result<Document, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let input = &self.input[self.offset..];
        match input.first() {
            Some(0xff) => {
                self.offset += 1;
                self.done = true;
                return None;
            }
            Some(_) => {}
            None => {
                self.done = true;
                return None;
            }
        }

        match self.decoder.decode(input) {
            Ok(document) => {
                self.offset += document.consumed();
                Some(Ok(document))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.rebase(self.offset)))
            }
        }
    }
}
