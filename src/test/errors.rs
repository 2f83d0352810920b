use crate::test::{
    key, run_error, run_error_with, seven_bit, smile, text, vint, zigzag_i32, HEADER_PLAIN,
    HEADER_SHARED_ALL, HEADER_SHARED_NAMES,
};
use crate::{Decoder, ErrorKind};
use std::error::Error as _;
use std::io::{self, Read, Write};

#[test]
fn empty_input() {
    run_error(b"", ErrorKind::TruncatedInput, 0);
}

#[test]
fn header_only() {
    run_error(HEADER_PLAIN, ErrorKind::TruncatedInput, 4);
}

#[test]
fn truncated_header() {
    run_error(b":", ErrorKind::TruncatedInput, 1);
    run_error(b":)\n", ErrorKind::TruncatedInput, 3);
}

#[test]
fn invalid_header() {
    run_error(b":)x\x00\xc2", ErrorKind::Header, 0);
    run_error(b":(\n\x00\xc2", ErrorKind::Header, 0);
}

#[test]
fn unsupported_version() {
    run_error(b":)\n\x10\xc2", ErrorKind::Header, 3);
    run_error(b":)\n\xf3\xc2", ErrorKind::Header, 3);
}

#[test]
fn require_header() {
    let decoder = Decoder::builder().require_header(true).build();
    run_error_with(&decoder, b"\xc2", ErrorKind::Header, 0);
    run_error_with(&decoder, b"", ErrorKind::Header, 0);

    let document = decoder.decode(&smile(HEADER_PLAIN, b"\xc2")).unwrap();
    assert_eq!(document.json(), "1");
}

#[test]
fn end_marker_at_root() {
    run_error(&smile(HEADER_PLAIN, b"\xff"), ErrorKind::TruncatedInput, 4);
}

#[test]
fn truncated_scalars() {
    run_error(&smile(HEADER_PLAIN, b"\x24"), ErrorKind::TruncatedInput, 5);
    run_error(&smile(HEADER_PLAIN, b"\x25\x01"), ErrorKind::TruncatedInput, 6);
    run_error(&smile(HEADER_PLAIN, b"\x28\x01\x01"), ErrorKind::TruncatedInput, 7);
    run_error(&smile(HEADER_PLAIN, b"\x29\x01\x01"), ErrorKind::TruncatedInput, 7);
    run_error(&smile(HEADER_PLAIN, b"\x45abc"), ErrorKind::TruncatedInput, 8);
    run_error(&smile(HEADER_PLAIN, b"\xe0abc"), ErrorKind::TruncatedInput, 8);
    run_error(&smile(HEADER_PLAIN, b"\xe8\x87\x01"), ErrorKind::TruncatedInput, 7);
    run_error(&smile(HEADER_PLAIN, b"\xfd\x85abc"), ErrorKind::TruncatedInput, 9);
}

#[test]
fn truncated_names() {
    run_error(&smile(HEADER_PLAIN, b"\xfa\x85ab"), ErrorKind::TruncatedInput, 8);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x34ab"), ErrorKind::TruncatedInput, 8);
    run_error(&smile(HEADER_SHARED_NAMES, b"\xfa\x30"), ErrorKind::TruncatedInput, 6);
}

#[test]
fn every_prefix_fails() {
    let mut body = vec![0xfa];
    body.extend(key("numbers"));
    body.extend_from_slice(&[0xf8, 0x24]);
    body.extend(vint(3200));
    body.push(0xc2);
    body.push(0xf9);
    body.extend(key("text"));
    body.extend(text("hello"));
    body.extend(key("other"));
    body.push(0x01);
    body.push(0xfb);
    let input = smile(HEADER_SHARED_ALL, &body);

    assert_eq!(
        crate::decode(&input).unwrap().json(),
        r#"{"numbers":[1600,1],"text":"hello","other":"hello"}"#,
    );

    for len in 0..input.len() {
        let err = crate::decode(&input[..len]).unwrap_err();
        assert!(
            err.kind() == ErrorKind::TruncatedInput || err.kind() == ErrorKind::Structural,
            "{}: {}",
            len,
            err,
        );
        assert!(err.offset() <= len, "{}: {}", len, err);
    }
}

#[test]
fn unclosed_containers() {
    run_error(&smile(HEADER_PLAIN, b"\xf8"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xf8\xc2"), ErrorKind::Structural, 6);
    run_error(&smile(HEADER_PLAIN, b"\xfa"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x80a\xc2"), ErrorKind::Structural, 8);
    run_error(&smile(HEADER_PLAIN, b"\xf8\xff"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\xff"), ErrorKind::Structural, 5);
}

#[test]
fn missing_value() {
    run_error(&smile(HEADER_PLAIN, b"\xfa\x80a"), ErrorKind::Structural, 7);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x80a\xfb"), ErrorKind::Structural, 7);
}

#[test]
fn mismatched_ends() {
    run_error(&smile(HEADER_PLAIN, b"\xf8\xfb"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\xf9"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x80a\xf9"), ErrorKind::Structural, 7);
}

#[test]
fn unexpected_tokens() {
    run_error(&smile(HEADER_PLAIN, b"\xf9"), ErrorKind::Structural, 4);
    run_error(&smile(HEADER_PLAIN, b"\xfb"), ErrorKind::Structural, 4);
    run_error(&smile(HEADER_PLAIN, b"\xfc"), ErrorKind::Structural, 4);
    run_error(&smile(HEADER_PLAIN, b"\xfa\xfa"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\xf8"), ErrorKind::Structural, 5);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x3a"), ErrorKind::Structural, 5);
}

#[test]
fn reserved_value_tokens() {
    for &token in &[0x00, 0x27, 0x2b, 0x3f, 0xe1, 0xe5, 0xe9, 0xf0, 0xf7, 0xfe] {
        run_error(&smile(HEADER_PLAIN, &[token]), ErrorKind::UnsupportedToken, 4);
    }
}

#[test]
fn reserved_key_tokens() {
    for &token in &[0x00, 0x1f, 0x21, 0x35, 0x3f, 0xfc, 0xfe] {
        run_error(&smile(HEADER_PLAIN, &[0xfa, token]), ErrorKind::UnsupportedToken, 5);
    }
}

#[test]
fn invalid_utf8() {
    run_error(&smile(HEADER_PLAIN, b"\x41\xc3\x28"), ErrorKind::InvalidUtf8, 4);
    run_error(&smile(HEADER_PLAIN, b"\xe0\xff\xfc"), ErrorKind::InvalidUtf8, 4);
    run_error(&smile(HEADER_PLAIN, b"\xfa\x81\xc3\x28\xc2\xfb"), ErrorKind::InvalidUtf8, 5);
}

#[test]
fn invalid_vint() {
    run_error(&smile(HEADER_PLAIN, b"\x24\x7f\x7f\x7f\x7f\x7f\x80"), ErrorKind::InvalidVint, 5);
    run_error(&smile(HEADER_PLAIN, b"\x24\x20\x00\x00\x00\x80"), ErrorKind::InvalidVint, 5);

    let mut body = vec![0x25];
    body.extend_from_slice(&[0x7f; 10]);
    body.push(0x80);
    run_error(&smile(HEADER_PLAIN, &body), ErrorKind::InvalidVint, 5);
}

#[test]
fn huge_binary_length() {
    let mut body = vec![0xfd];
    body.extend(vint(u64::from(u32::MAX)));
    run_error(&smile(HEADER_PLAIN, &body), ErrorKind::TruncatedInput, 10);
}

#[test]
fn number_too_long() {
    let mut body = vec![0x26];
    body.extend(seven_bit(&[0x7f; 417]));
    run_error(&smile(HEADER_PLAIN, &body), ErrorKind::NumberTooLong, 4);

    // the length is checked before the body is read
    let mut body = vec![0x26];
    body.extend(vint(1_000_000));
    run_error(&smile(HEADER_PLAIN, &body), ErrorKind::NumberTooLong, 4);

    let mut body = vec![0x2a];
    body.extend(vint(zigzag_i32(2)));
    body.extend(seven_bit(&[0x7f; 417]));
    run_error(&smile(HEADER_PLAIN, &body), ErrorKind::NumberTooLong, 4);

    let mut body = vec![0x26];
    body.extend(seven_bit(&[0x7f; 416]));
    let document = crate::decode(&smile(HEADER_PLAIN, &body)).unwrap();
    assert!(document.json().len() > 1000);
}

#[test]
fn configured_number_len() {
    let decoder = Decoder::builder().max_number_len(2).build();

    let mut body = vec![0x26];
    body.extend(seven_bit(&[0x01, 0x02]));
    assert_eq!(decoder.decode(&smile(HEADER_PLAIN, &body)).unwrap().json(), "258");

    let mut body = vec![0xf8, 0x26];
    body.extend(seven_bit(&[0x01, 0x02, 0x03]));
    body.push(0xf9);
    run_error_with(&decoder, &smile(HEADER_PLAIN, &body), ErrorKind::NumberTooLong, 5);

    let mut body = vec![0x2a];
    body.extend(vint(zigzag_i32(1)));
    body.extend(seven_bit(&[0x01, 0x02, 0x03]));
    run_error_with(&decoder, &smile(HEADER_PLAIN, &body), ErrorKind::NumberTooLong, 4);

    // binary values are not numbers
    let mut body = vec![0xe8];
    body.extend(seven_bit(&[0x00; 3]));
    assert_eq!(decoder.decode(&smile(HEADER_PLAIN, &body)).unwrap().json(), r#""AAAA""#);
}

#[test]
fn error_display() {
    let err = crate::decode(&smile(HEADER_PLAIN, b"\xf8")).unwrap_err();
    assert_eq!(err.to_string(), "EOF while parsing array at offset 5");
    assert!(err.source().is_none());
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "blammo"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_failure() {
    let input = smile(HEADER_PLAIN, b"\xf8\xf9");
    let err = crate::decode_to_writer(&input, FailingWriter).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.offset(), 5);
    assert_eq!(err.source().unwrap().to_string(), "blammo");
}

struct FailingReader {
    first: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.first {
            self.first = false;
            buf[..4].copy_from_slice(b":)\n\x00");
            Ok(4)
        } else {
            Err(io::Error::new(io::ErrorKind::Other, "blammo"))
        }
    }
}

#[test]
fn reader_failure() {
    let err = crate::decode_reader(FailingReader { first: true }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.offset(), 4);
    assert_eq!(err.source().unwrap().to_string(), "blammo");
}
