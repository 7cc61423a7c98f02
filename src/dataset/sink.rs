//! Delimited-text dataset sink.
//!
//! Rows use the URL-content schema. A new or empty file gets a header row;
//! an existing file is appended to only if its header matches the schema.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing::info;

use crate::dataset::DatasetSink;
use crate::error::{Error, Result};
use crate::record::{FeatureRecord, SchemaVariant};

/// Appends URL-content records to a CSV file.
#[derive(Debug, Clone)]
pub struct CsvDatasetSink {
    path: PathBuf,
}

impl CsvDatasetSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether a header row must be written, after checking any existing one.
    fn needs_header(&self) -> Result<bool> {
        let is_empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };
        if is_empty {
            return Ok(true);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        let mut header = csv::StringRecord::new();
        if !reader.read_record(&mut header)? {
            return Ok(true);
        }

        let expected = SchemaVariant::UrlContent.keys();
        if header.iter().ne(expected.iter().copied()) {
            return Err(Error::SchemaViolation(format!(
                "{} has a different header ({} columns, expected {})",
                self.path.display(),
                header.len(),
                expected.len()
            )));
        }
        Ok(false)
    }
}

impl DatasetSink for CsvDatasetSink {
    fn append(&self, records: &[FeatureRecord]) -> Result<usize> {
        for record in records {
            if record.schema != SchemaVariant::UrlContent {
                return Err(Error::SchemaViolation(
                    "dataset rows need the url-content schema".to_string(),
                ));
            }
            record.verify_schema()?;
        }

        let write_header = self.needs_header()?;
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        if write_header {
            writer.write_record(SchemaVariant::UrlContent.keys())?;
        }
        for record in records {
            writer.write_record(record.entries().iter().map(|(_, value)| value.to_string()))?;
        }
        writer.flush()?;

        info!(rows = records.len(), path = %self.path.display(), "appended dataset rows");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract_with_options, Options};

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("phish-features-sink-{name}-{}.csv", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn dataset_record(url: &str, label: &str) -> FeatureRecord {
        match extract_with_options("<title>t</title>", &Options::for_dataset(url, label)) {
            Ok(record) => record,
            Err(err) => panic!("extraction failed: {err}"),
        }
    }

    #[test]
    fn header_written_once() {
        let path = scratch_file("header");
        let sink = CsvDatasetSink::new(&path);

        assert_eq!(sink.append(&[dataset_record("https://a.example/", "legitimate")]).ok(), Some(1));
        assert_eq!(sink.append(&[dataset_record("https://b.example/", "phishing")]).ok(), Some(1));

        let content = fs::read_to_string(&path).unwrap_or_default();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("url,type,has_title,"));
        assert!(lines[1].starts_with("https://a.example/,legitimate,True,"));
        assert!(lines[2].starts_with("https://b.example/,phishing,True,"));
    }

    #[test]
    fn mismatched_header_rejected() {
        let path = scratch_file("mismatch");
        if let Err(err) = fs::write(&path, "url,type,something_else\n") {
            panic!("write failed: {err}");
        }
        let sink = CsvDatasetSink::new(&path);

        let result = sink.append(&[dataset_record("https://a.example/", "legitimate")]);
        assert!(matches!(result, Err(Error::SchemaViolation(_))));
        assert_eq!(fs::read_to_string(&path).unwrap_or_default(), "url,type,something_else\n");
    }

    #[test]
    fn prediction_records_rejected() {
        let path = scratch_file("prediction");
        let record = match crate::extract("", "https://a.example/") {
            Ok(record) => record,
            Err(err) => panic!("extraction failed: {err}"),
        };
        let result = CsvDatasetSink::new(&path).append(&[record]);
        assert!(matches!(result, Err(Error::SchemaViolation(_))));
        assert!(!path.exists());
    }
}
