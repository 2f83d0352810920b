use crate::test::{
    float32, float64, run_test, seven_bit, smile, text, vint, zigzag_i32, zigzag_i64, HEADER_PLAIN,
    HEADER_RAW_BINARY,
};

fn run_value(body: &[u8], expected: &str) {
    run_test(&smile(HEADER_PLAIN, body), expected);
}

#[test]
fn literals() {
    run_value(&[0x21], "null");
    run_value(&[0x22], "false");
    run_value(&[0x23], "true");
}

#[test]
fn small_int() {
    run_value(&[0xc0], "0");
    run_value(&[0xc1], "-1");
    run_value(&[0xc2], "1");
    run_value(&[0xde], "15");
    run_value(&[0xdf], "-16");
}

#[test]
fn int32() {
    for &v in &[1600, -1600, 16, -17, i32::MAX, i32::MIN] {
        let mut body = vec![0x24];
        body.extend(vint(zigzag_i32(v)));
        run_value(&body, &v.to_string());
    }
}

#[test]
fn int64() {
    for &v in &[i64::from(i32::MAX) + 1, i64::from(i32::MIN) - 1, i64::MAX, i64::MIN] {
        let mut body = vec![0x25];
        body.extend(vint(zigzag_i64(v)));
        run_value(&body, &v.to_string());
    }
}

#[test]
fn float() {
    let mut body = vec![0x28];
    body.extend(float32(1.5));
    run_value(&body, "1.5");

    let mut body = vec![0x28];
    body.extend(float32(-0.1));
    run_value(&body, "-0.1");

    let mut body = vec![0x28];
    body.extend(float32(3.0));
    run_value(&body, "3.0");
}

#[test]
fn double() {
    let mut body = vec![0x29];
    body.extend(float64(-2.25));
    run_value(&body, "-2.25");

    let mut body = vec![0x29];
    body.extend(float64(0.1));
    run_value(&body, "0.1");

    let mut body = vec![0x29];
    body.extend(float64(1e300));
    run_value(&body, "1e300");

    let mut body = vec![0x29];
    body.extend(float64(100.0));
    run_value(&body, "100.0");
}

#[test]
fn non_finite_double() {
    for &v in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut body = vec![0x29];
        body.extend(float64(v));
        run_value(&body, "null");
    }
}

#[test]
fn big_integer() {
    // 2^64
    let mut body = vec![0x26];
    body.extend(seven_bit(&[0x01, 0, 0, 0, 0, 0, 0, 0, 0]));
    run_value(&body, "18446744073709551616");

    let mut body = vec![0x26];
    body.extend(seven_bit(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0]));
    run_value(&body, "-18446744073709551616");

    let mut body = vec![0x26];
    body.extend(seven_bit(&[]));
    run_value(&body, "0");
}

#[test]
fn big_decimal() {
    let mut body = vec![0x2a];
    body.extend(vint(zigzag_i32(2)));
    body.extend(seven_bit(&[0x30, 0x39]));
    run_value(&body, "123.45");

    let mut body = vec![0x2a];
    body.extend(vint(zigzag_i32(3)));
    body.extend(seven_bit(&[0x05]));
    run_value(&body, "0.005");

    let mut body = vec![0x2a];
    body.extend(vint(zigzag_i32(-3)));
    body.extend(seven_bit(&[0x05]));
    run_value(&body, "5e3");
}

#[test]
fn empty_string() {
    run_value(&[0x20], r#""""#);
}

#[test]
fn short_ascii() {
    for &len in &[1, 32, 33, 64] {
        let s = "x".repeat(len);
        run_value(&text(&s), &format!(r#""{}""#, s));
    }
}

#[test]
fn short_unicode() {
    run_value(&text("\u{e9}"), "\"\u{e9}\"");
    run_value(&text("h\u{e9}llo"), "\"h\u{e9}llo\"");

    // 33 and 65 bytes
    let s = format!("{}\u{e9}", "x".repeat(31));
    run_value(&text(&s), &format!(r#""{}""#, s));
    let s = format!("{}\u{e9}", "x".repeat(63));
    run_value(&text(&s), &format!(r#""{}""#, s));
}

#[test]
fn long_string() {
    let s = "y".repeat(100);
    let mut body = vec![0xe0];
    body.extend_from_slice(s.as_bytes());
    body.push(0xfc);
    run_value(&body, &format!(r#""{}""#, s));

    let s = "\u{1f600}".repeat(30);
    let mut body = vec![0xe4];
    body.extend_from_slice(s.as_bytes());
    body.push(0xfc);
    run_value(&body, &format!(r#""{}""#, s));
}

#[test]
fn escaped_string() {
    run_value(&text("a\"b\\c\nd\u{1}"), r#""a\"b\\c\nd\u0001""#);
}

#[test]
fn seven_bit_binary() {
    let mut body = vec![0xe8];
    body.extend(seven_bit(b"hello"));
    run_value(&body, r#""aGVsbG8=""#);

    let mut body = vec![0xe8];
    body.extend(seven_bit(&[0xff; 20]));
    run_value(&body, r#""//////////////////////////8=""#);
}

#[test]
fn raw_binary() {
    let mut body = vec![0xfd];
    body.extend(vint(5));
    body.extend_from_slice(b"hello");
    run_test(&smile(HEADER_RAW_BINARY, &body), r#""aGVsbG8=""#);

    // raw bytes may contain control tokens
    let mut body = vec![0xfd];
    body.extend(vint(3));
    body.extend_from_slice(&[0xff, 0xfb, 0xf9]);
    run_test(&smile(HEADER_RAW_BINARY, &body), r#""//v5""#);
}

#[test]
fn headerless_scalar() {
    run_test(&[0xc2], "1");
    run_test(&text("abc"), r#""abc""#);
}
