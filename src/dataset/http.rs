//! Live HTML source over HTTP.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::dataset::HtmlSource;
use crate::encoding::decode_html;
use crate::error::{Error, Result};

/// Desktop browser User-Agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches pages with a blocking client. Safe to share across batch workers.
#[derive(Debug, Clone)]
pub struct HttpHtmlSource {
    client: Client,
}

impl HttpHtmlSource {
    /// Client with the browser User-Agent and a 5 second timeout.
    ///
    /// `accept_invalid_certs` skips TLS certificate checks; phishing hosts
    /// often serve self-signed or expired certificates.
    pub fn new(accept_invalid_certs: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Non-2xx responses are failures, never empty pages.
pub fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(Error::Fetch {
        url: url.to_string(),
        reason: format!("HTTP {status}"),
    })
}

impl HtmlSource for HttpHtmlSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let fail = |e: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            reason: if e.is_timeout() {
                format!("timed out after {}s", FETCH_TIMEOUT.as_secs())
            } else {
                e.to_string()
            },
        };

        let response = self.client.get(url).send().map_err(fail)?;
        check_status(url, response.status())?;
        let body = response.bytes().map_err(fail)?;

        debug!(url, bytes = body.len(), "fetched page");
        Ok(decode_html(&body))
    }
}
