//! HTTP capture client for terms/privacy/data policy pages.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::convert::{DEFAULT_WIDTH, html_to_text};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("HTML conversion failed: {0}")]
    Convert(#[from] html2text::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches a page and converts it to line-oriented text.
pub struct CaptureClient {
    client: reqwest::Client,
    width: usize,
}

impl Default for CaptureClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureClient {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    /// Client that wraps rendered text at `width` columns.
    pub fn with_width(width: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            width,
        }
    }

    /// GET `url` and return the body. Any non-success status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, CaptureError> {
        info!(url = %url, "fetching policy page");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CaptureError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let html = resp.text().await?;
        info!(bytes = html.len(), "fetched policy page");
        Ok(html)
    }

    /// Fetch `url` and render it as plain text.
    pub async fn capture(&self, url: &str) -> Result<String, CaptureError> {
        let html = self.fetch(url).await?;
        html_to_text(&html, self.width)
    }
}

/// Append captured `text` to the policy source at `path`, creating it if
/// needed. Returns the number of lines appended.
pub fn append_to_source(path: &Path, text: &str) -> Result<usize, CaptureError> {
    let needs_newline = match std::fs::read(path) {
        Ok(existing) => !existing.is_empty() && !existing.ends_with(b"\n"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        file.write_all(b"\n")?;
    }
    file.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        file.write_all(b"\n")?;
    }

    let count = text.lines().count();
    info!(path = %path.display(), lines = count, "appended capture to policy source");
    Ok(count)
}
