use std::{error, fmt, io};

/// The category of a decoding failure.
///
/// Every [`Error`] belongs to exactly one kind. Embedders that need to map failures onto their own exception types
/// should match on this rather than on the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The Smile header was present but malformed, declared an unsupported version, or was required and missing.
    Header,
    /// The input ended in the middle of a token.
    TruncatedInput,
    /// A token was not legal at its position, containers were unbalanced, or the stream ended with open containers.
    Structural,
    /// A back-reference pointed outside of the corresponding shared string table.
    InvalidBackReference,
    /// The nesting depth exceeded the configured maximum.
    DepthExceeded,
    /// A type byte is reserved or unknown to this decoder.
    UnsupportedToken,
    /// A string value or field name was not valid UTF-8.
    InvalidUtf8,
    /// A variable length integer was not terminated or did not fit its type.
    InvalidVint,
    /// A declared length does not fit in memory.
    LengthOverflow,
    /// A shared string table was full and the decoder was configured to reject further entries.
    TableOverflow,
    /// A big integer or big decimal was longer than the configured maximum.
    NumberTooLong,
    /// Writing to the output sink failed.
    Io,
}

#[derive(Debug)]
enum Code {
    Io(io::Error),
    EofWhileParsingHeader,
    InvalidHeader,
    UnsupportedVersion,
    MissingHeader,
    EofWhileParsingValue,
    EofWhileParsingArray,
    EofWhileParsingMap,
    UnexpectedToken,
    MismatchedEnd,
    ReservedToken,
    InvalidStringReference,
    RecursionLimitExceeded,
    InvalidUtf8,
    UnterminatedVint,
    VintOverflow,
    BufferLengthOverflow,
    SharedTableFull,
    NumberTooLong,
}

impl Code {
    fn kind(&self) -> ErrorKind {
        match self {
            Code::Io(_) => ErrorKind::Io,
            Code::InvalidHeader | Code::UnsupportedVersion | Code::MissingHeader => ErrorKind::Header,
            Code::EofWhileParsingHeader | Code::EofWhileParsingValue => ErrorKind::TruncatedInput,
            Code::EofWhileParsingArray
            | Code::EofWhileParsingMap
            | Code::UnexpectedToken
            | Code::MismatchedEnd => ErrorKind::Structural,
            Code::ReservedToken => ErrorKind::UnsupportedToken,
            Code::InvalidStringReference => ErrorKind::InvalidBackReference,
            Code::RecursionLimitExceeded => ErrorKind::DepthExceeded,
            Code::InvalidUtf8 => ErrorKind::InvalidUtf8,
            Code::UnterminatedVint | Code::VintOverflow => ErrorKind::InvalidVint,
            Code::BufferLengthOverflow => ErrorKind::LengthOverflow,
            Code::SharedTableFull => ErrorKind::TableOverflow,
            Code::NumberTooLong => ErrorKind::NumberTooLong,
        }
    }
}

#[derive(Debug)]
struct ErrorImpl {
    code: Code,
    offset: usize,
}

/// An error encountered when decoding Smile data.
///
/// Errors are terminal for the decode call that produced them. The offset points at the start of the offending token,
/// or at the position where more input was needed for truncation errors.
#[derive(Debug)]
pub struct Error(Box<ErrorImpl>);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match &self.0.code {
            Code::Io(_) => "IO error",
            Code::EofWhileParsingHeader => "EOF while parsing header",
            Code::InvalidHeader => "invalid header",
            Code::UnsupportedVersion => "unsupported version",
            Code::MissingHeader => "missing header",
            Code::EofWhileParsingValue => "EOF while parsing a value",
            Code::EofWhileParsingArray => "EOF while parsing array",
            Code::EofWhileParsingMap => "EOF while parsing map",
            Code::UnexpectedToken => "unexpected token",
            Code::MismatchedEnd => "mismatched container end",
            Code::ReservedToken => "reserved token",
            Code::InvalidStringReference => "invalid string reference",
            Code::RecursionLimitExceeded => "recursion limit exceeded",
            Code::InvalidUtf8 => "invalid UTF-8",
            Code::UnterminatedVint => "unterminated vint",
            Code::VintOverflow => "vint overflow",
            Code::BufferLengthOverflow => "buffer length overflow",
            Code::SharedTableFull => "shared string table full",
            Code::NumberTooLong => "number too long",
        };
        write!(f, "{} at offset {}", msg, self.0.offset)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.0.code {
            Code::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.0.code.kind()
    }

    /// Returns the byte offset into the input at which the error occurred.
    pub fn offset(&self) -> usize {
        self.0.offset
    }

    pub(crate) fn rebase(mut self, base: usize) -> Self {
        self.0.offset += base;
        self
    }

    fn new(code: Code, offset: usize) -> Self {
        Error(Box::new(ErrorImpl { code, offset }))
    }

    pub(crate) fn io(e: io::Error, offset: usize) -> Self {
        Error::new(Code::Io(e), offset)
    }

    pub(crate) fn eof_while_parsing_header(offset: usize) -> Self {
        Error::new(Code::EofWhileParsingHeader, offset)
    }

    pub(crate) fn invalid_header(offset: usize) -> Self {
        Error::new(Code::InvalidHeader, offset)
    }

    pub(crate) fn unsupported_version(offset: usize) -> Self {
        Error::new(Code::UnsupportedVersion, offset)
    }

    pub(crate) fn missing_header(offset: usize) -> Self {
        Error::new(Code::MissingHeader, offset)
    }

    pub(crate) fn eof_while_parsing_value(offset: usize) -> Self {
        Error::new(Code::EofWhileParsingValue, offset)
    }

    pub(crate) fn eof_while_parsing_array(offset: usize) -> Self {
        Error::new(Code::EofWhileParsingArray, offset)
    }

    pub(crate) fn eof_while_parsing_map(offset: usize) -> Self {
        Error::new(Code::EofWhileParsingMap, offset)
    }

    pub(crate) fn unexpected_token(offset: usize) -> Self {
        Error::new(Code::UnexpectedToken, offset)
    }

    pub(crate) fn mismatched_end(offset: usize) -> Self {
        Error::new(Code::MismatchedEnd, offset)
    }

    pub(crate) fn reserved_token(offset: usize) -> Self {
        Error::new(Code::ReservedToken, offset)
    }

    pub(crate) fn invalid_string_reference(offset: usize) -> Self {
        Error::new(Code::InvalidStringReference, offset)
    }

    pub(crate) fn recursion_limit_exceeded(offset: usize) -> Self {
        Error::new(Code::RecursionLimitExceeded, offset)
    }

    pub(crate) fn invalid_utf8(offset: usize) -> Self {
        Error::new(Code::InvalidUtf8, offset)
    }

    pub(crate) fn unterminated_vint(offset: usize) -> Self {
        Error::new(Code::UnterminatedVint, offset)
    }

    pub(crate) fn vint_overflow(offset: usize) -> Self {
        Error::new(Code::VintOverflow, offset)
    }

    pub(crate) fn buffer_length_overflow(offset: usize) -> Self {
        Error::new(Code::BufferLengthOverflow, offset)
    }

    pub(crate) fn shared_table_full(offset: usize) -> Self {
        Error::new(Code::SharedTableFull, offset)
    }

    pub(crate) fn number_too_long(offset: usize) -> Self {
        Error::new(Code::NumberTooLong, offset)
    }
}
