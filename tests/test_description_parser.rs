//! Integration tests for the text font description parser.

use fon_oxide::{load_description, parse_description, Error, FontStyle, Glyph};
use std::fs;
use tempfile::tempdir;

/// A small proportional font: digits get real bitmaps, everything else is
/// a blank cell.
fn sample_font() -> String {
    let mut text = String::from(
        "# Sample font\r\n\
         copyright Copyright (c) nobody\r\n\
         facename Sample Sans\r\n\
         height 5\r\n\
         ascent 4\r\n\
         pointsize 6\r\n\
         weight 700\r\n\
         charset 0\r\n\
         underline yes\r\n\
         \r\n",
    );
    for code in 0..256 {
        text.push_str(&format!("char {}\r\n", code));
        if code == u32::from(b'1') {
            text.push_str("width 3\r\n010\r\n110\r\n010\r\n010\r\n111\r\n");
        } else if code == u32::from(b'X') {
            text.push_str("width 5\r\n10001\r\n01010\r\n00100\r\n01010\r\n10001\r\n");
        } else {
            text.push_str("width 4\r\n");
        }
    }
    text
}

#[test]
fn test_sample_font_parses() {
    let font = parse_description(&sample_font(), "sample.fd").unwrap();
    assert_eq!(font.copyright, "Copyright (c) nobody");
    assert_eq!(font.face_name, "Sample Sans");
    assert_eq!(font.height, 5);
    assert_eq!(font.ascent, 4);
    assert_eq!(font.point_size, 6);
    assert_eq!(font.weight, 700);
    assert_eq!(font.style, FontStyle::UNDERLINE);

    let one = font.glyph(b'1').unwrap();
    assert_eq!(one.width, 3);
    assert_eq!(
        one,
        &Glyph::from_digits(3, &["010", "110", "010", "010", "111"]).unwrap()
    );
    assert!(one.pixel(0, 1));
    assert!(!one.pixel(2, 1));

    let x = font.glyph(b'X').unwrap();
    assert_eq!(x.width, 5);
    assert_eq!(x.row_byte(2, 0), 0b0010_0000);

    let blank = font.glyph(b'a').unwrap();
    assert_eq!(blank.width, 4);
    assert!(blank.rows.is_empty());
}

#[test]
fn test_load_description_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.fd");
    fs::write(&path, sample_font()).unwrap();

    let font = load_description(&path).unwrap();
    assert_eq!(font.face_name, "Sample Sans");
}

#[test]
fn test_errors_name_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.fd");
    fs::write(&path, "copyright c\nheight 8\nsparkle yes\n").unwrap();

    let err = load_description(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("broken.fd:3"), "unexpected message: {}", msg);
    assert!(msg.contains("sparkle"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_description(dir.path().join("absent.fd")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_style_flags_clear_on_other_values() {
    let text = sample_font().replace("underline yes", "underline no\r\nitalic yes\r\nitalic maybe");
    let font = parse_description(&text, "s.fd").unwrap();
    assert!(font.style.is_empty());
}

#[test]
fn test_wide_glyph_accepted() {
    let row = format!("1{}1", "0".repeat(70));
    let text = sample_font().replacen(
        "char 0\r\nwidth 4\r\n",
        &format!("char 0\r\nwidth 72\r\n{}\r\n", row),
        1,
    );
    let font = parse_description(&text, "s.fd").unwrap();
    let wide = font.glyph(0).unwrap();
    assert_eq!(wide.width, 72);
    assert!(wide.pixel(0, 0) && wide.pixel(71, 0));

    let fnt = fon_oxide::encode_fnt(&font).unwrap();
    assert_eq!(fnt.metrics().max_width, 72);
    assert_eq!(fnt.metrics().width_bytes, 10);
}

#[test]
fn test_sample_font_encodes() {
    let font = parse_description(&sample_font(), "sample.fd").unwrap();
    let fnt = fon_oxide::encode_fnt(&font).unwrap();
    assert_eq!(fnt.face_name(), "Sample Sans");
    assert_eq!(fnt.metrics().avg_width, 5);
    assert_eq!(fnt.metrics().max_width, 5);
    assert!(!fnt.metrics().fixed_pitch);
}
