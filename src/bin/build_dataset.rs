//! Builds a labelled URL-content dataset.
//!
//! Usage: `build_dataset <urls.csv> <html_dir|--live|--live-insecure> <output.csv> [start end]`
//!
//! `urls.csv` needs `url` and `type` columns. Pages are read from
//! `<html_dir>/<host>.html`, or fetched over HTTP with `--live`
//! (`--live-insecure` also accepts invalid TLS certificates). Rows are
//! appended to `output.csv`; the header is written only when the file is new.
//! `start`/`end` are 1-based data row numbers, both inclusive.

use std::env;
use std::error::Error;
use std::path::PathBuf;

use phish_features::dataset::{
    build_dataset, read_url_list, CsvDatasetSink, DatasetSink, DirectoryHtmlSource, HtmlSource,
    HttpHtmlSource,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: build_dataset <urls.csv> <html_dir|--live|--live-insecure> <output.csv> [start end]\n\
    start/end: 1-based data row numbers, inclusive";

fn html_source(arg: &str) -> Result<Box<dyn HtmlSource + Sync>, Box<dyn Error>> {
    Ok(match arg {
        "--live" => Box::new(HttpHtmlSource::new(false)?),
        "--live-insecure" => Box::new(HttpHtmlSource::new(true)?),
        dir => Box::new(DirectoryHtmlSource::new(dir)),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (input, source_arg, output) = match args.as_slice() {
        [input, source, output, ..] => (PathBuf::from(input), source.as_str(), PathBuf::from(output)),
        _ => return Err(USAGE.into()),
    };
    let rows = match &args[3..] {
        [] => None,
        [start, end] => Some((start.parse::<usize>()?, end.parse::<usize>()?)),
        _ => return Err(USAGE.into()),
    };

    let entries = read_url_list(&input, rows)?;
    info!(entries = entries.len(), input = %input.display(), source = source_arg, "loaded url list");

    let source = html_source(source_arg)?;
    let outcome = build_dataset(source.as_ref(), &entries);

    let written = CsvDatasetSink::new(&output).append(&outcome.records)?;
    info!(
        written,
        skipped = outcome.failed.len(),
        output = %output.display(),
        "dataset updated"
    );
    Ok(())
}
