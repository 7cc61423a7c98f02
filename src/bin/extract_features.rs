//! Extracts the prediction-schema feature record of one page as JSON.
//!
//! Usage: `extract_features <url> [file.html]`
//!
//! Reads HTML from the file, or from stdin when no file is given. Set
//! `RUST_LOG=debug` for extraction logs on stderr.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

use phish_features::{extract_bytes, Options};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(url) = args.next() else {
        return Err("usage: extract_features <url> [file.html]".into());
    };

    let html = match args.next() {
        Some(path) => fs::read(&path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let record = extract_bytes(&html, &Options::for_prediction(&url))?;
    let missing = record.missing_features();
    if !missing.is_empty() {
        tracing::info!(count = missing.len(), keys = ?missing, "features without a value");
    }

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
