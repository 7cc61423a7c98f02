//! Dataset pipeline: URL list, saved pages, batch extraction, CSV sink.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use std::fs;
use std::path::PathBuf;

use phish_features::dataset::{
    build_dataset, classify, read_url_list, Classifier, CsvDatasetSink, DatasetSink,
    DirectoryHtmlSource, Prediction,
};
use phish_features::{Error, Result, SchemaVariant};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("phish-features-it-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("html")).expect("create scratch dir");
    dir
}

/// Flags pages with a password input, rejects incomplete vectors.
struct PasswordRule;

impl Classifier for PasswordRule {
    fn predict(&self, features: &[f64]) -> Result<Prediction> {
        if features[0].is_nan() {
            return Err(Error::Classifier("missing has_title".to_string()));
        }
        // has_password_input
        Ok(if features[8] == 1.0 {
            Prediction::Phishing
        } else {
            Prediction::Legitimate
        })
    }
}

#[test]
fn builds_and_appends_dataset() {
    let dir = scratch_dir("build");
    fs::write(
        dir.join("urls.csv"),
        "url,type\ngood.example,legitimate\nhttps://bad.example/login,phishing\nmissing.example,phishing\n",
    )
    .expect("write url list");
    fs::write(dir.join("html/good.example.html"), "<title>Home</title><p>Welcome</p>")
        .expect("write page");
    fs::write(
        dir.join("html/bad.example.html"),
        r#"<form action="login.php"><input type="password"></form>"#,
    )
    .expect("write page");

    let entries = read_url_list(&dir.join("urls.csv"), None).expect("read url list");
    let outcome = build_dataset(&DirectoryHtmlSource::new(dir.join("html")), &entries);

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "https://missing.example");
    assert!(outcome.records.iter().all(|r| r.schema == SchemaVariant::UrlContent));

    let output = dir.join("dataset.csv");
    let sink = CsvDatasetSink::new(&output);
    assert_eq!(sink.append(&outcome.records).expect("append"), 2);
    assert_eq!(sink.append(&outcome.records[..1]).expect("append"), 1);

    let mut reader = csv::Reader::from_path(&output).expect("open dataset");
    let header = reader.headers().expect("header").clone();
    assert_eq!(header.iter().collect::<Vec<_>>(), SchemaVariant::UrlContent.keys());

    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "https://good.example");
    assert_eq!(&rows[0][1], "legitimate");
    assert_eq!(&rows[0][2], "True");
    assert_eq!(&rows[1][1], "phishing");

    let login_col = header.iter().position(|h| h == "has_login_form").expect("column");
    assert_eq!(&rows[1][login_col], "True");
    let placeholder_col = header.iter().position(|h| h == "has_ip_in_url").expect("column");
    assert_eq!(&rows[1][placeholder_col], "");
}

#[test]
fn url_list_row_window() {
    let dir = scratch_dir("window");
    let path = dir.join("urls.csv");
    let mut csv = String::from("url,type\n");
    for i in 0..10 {
        csv.push_str(&format!("site{i}.example,legitimate\n"));
    }
    fs::write(&path, csv).expect("write url list");

    // Row numbers are 1-based: rows 3..=5 are site2..site4.
    let window = read_url_list(&path, Some((3, 5))).expect("read window");
    let urls: Vec<_> = window.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["site2.example", "site3.example", "site4.example"]);

    assert!(read_url_list(&path, Some((20, 30))).expect("read window").is_empty());
}

#[test]
fn header_mismatch_leaves_file_untouched() {
    let dir = scratch_dir("mismatch");
    let output = dir.join("dataset.csv");
    let mut old_header = SchemaVariant::UrlContent.keys();
    old_header.pop();
    let existing = format!("{}\n", old_header.join(","));
    fs::write(&output, &existing).expect("write old dataset");

    let record = phish_features::extract_with_options(
        "<p>x</p>",
        &phish_features::Options::for_dataset("https://good.example/", "legitimate"),
    )
    .expect("extraction failed");

    let result = CsvDatasetSink::new(&output).append(&[record]);
    assert!(matches!(result, Err(Error::SchemaViolation(_))));
    assert_eq!(fs::read_to_string(&output).expect("read back"), existing);
}

#[test]
fn missing_url_list_is_an_error() {
    let dir = scratch_dir("missing");
    assert!(read_url_list(&dir.join("nope.csv"), None).is_err());
}

#[test]
fn classifier_receives_prediction_vector() {
    let phishing = phish_features::extract(
        r#"<input type="password">"#,
        "https://bad.example/",
    )
    .expect("extraction failed");
    let legit = phish_features::extract("<p>hello</p>", "https://good.example/")
        .expect("extraction failed");

    assert_eq!(classify(&phishing, &PasswordRule).expect("prediction"), Prediction::Phishing);
    assert_eq!(classify(&legit, &PasswordRule).expect("prediction"), Prediction::Legitimate);
}
