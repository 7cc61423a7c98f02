#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use phish_features::{extract_bytes, Options};

fn options() -> Options {
    Options::for_prediction("https://good.example/")
}

/// UTF-8 content is handled correctly
#[test]
fn utf8_content_handled_correctly() {
    let html = "<html><head><meta charset=\"utf-8\"><title>Connexion sécurisée</title></head>\
        <body><p>Vérifiez votre compte: é, ñ, ü, 中文</p></body></html>"
        .as_bytes();

    let record = extract_bytes(html, &options()).expect("extraction failed");

    assert!(record.binary.has_title);
    assert_eq!(record.heuristic.content_length, String::from_utf8_lossy(html).chars().count());
}

/// ISO-8859-1 pages are decoded before feature extraction
#[test]
fn iso88591_converted_to_utf8() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head>\
        <body><p>Caf\xE9 espa\xF1ol</p><a href=\"https://evil.example/\">M\xFCnchen</a></body></html>";

    let record = extract_bytes(html, &options()).expect("extraction failed");

    // "München" is seven characters once decoded
    assert_eq!(record.heuristic.avg_link_text_length, 7.0);
    assert_eq!(record.quantitative.num_external_links, 1);
}

/// Windows-1252 declared through Content-Type
#[test]
fn windows1252_detected_and_converted() {
    let html = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head>\
        <body><a href=\"/x\">\x93ok\x94</a></body></html>";

    let record = extract_bytes(html, &options()).expect("extraction failed");

    assert_eq!(record.heuristic.avg_link_text_length, 4.0);
}

/// Invalid sequences are replaced, not fatal
#[test]
fn invalid_encoding_handled_gracefully() {
    let html = b"<html><body><p>Valid text</p><p>Invalid: \xFF\xFE\xFD</p>\
        <form action=\"login.php\"></form></body></html>";

    let record = extract_bytes(html, &options()).expect("extraction failed");

    assert_eq!(record.quantitative.num_paragraph_tags, 2);
    assert!(record.binary.has_login_form);
}

/// UTF-8 is assumed when no charset declaration is present
#[test]
fn utf8_assumed_when_no_charset() {
    let html = "<p>naïve</p>".as_bytes();
    let record = extract_bytes(html, &options()).expect("extraction failed");
    assert_eq!(record.heuristic.content_length, "<p>naïve</p>".chars().count());
}
