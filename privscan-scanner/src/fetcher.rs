use crate::error::{Result, ScanError};
use crate::page::Page;
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Upper bound on response body size (10 MB). Bodies beyond this are
/// truncated during the streaming read rather than rejected afterwards.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("privscan/0.1")
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Parse an address, assuming "https://" when the scheme is missing.
    ///
    /// A missing scheme surfaces as `RelativeUrlWithoutBase`, which gets one
    /// retry with the secure scheme prepended. Any other parse failure is an
    /// invalid address.
    pub fn resolve_url(address: &str) -> Result<Url> {
        match Url::parse(address) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let with_scheme = format!("https://{}", address);
                Url::parse(&with_scheme)
                    .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", address, e)))
            }
            Err(e) => Err(ScanError::InvalidUrl(format!("{}: {}", address, e))),
        }
    }

    /// Fetch a single page. The returned `Page` carries the resolved address,
    /// status code and body regardless of status; callers decide whether a
    /// non-success status is fatal.
    pub async fn get(&self, address: &str) -> Result<Page> {
        let url = Self::resolve_url(address)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = read_body_capped(response, MAX_BODY_BYTES).await?;
        debug!("Fetched {} (status {}, {} bytes)", url, status_code, body.len());

        Ok(Page {
            url: url.to_string(),
            status_code,
            content_type,
            body,
        })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body in chunks, stopping at `max_bytes`. Truncated
/// multi-byte boundaries are converted lossily.
async fn read_body_capped(response: reqwest::Response, max_bytes: usize) -> Result<String> {
    let mut body = Vec::with_capacity(max_bytes.min(256 * 1024));
    let mut stream = response.bytes_stream();
    let mut total = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let remaining = max_bytes.saturating_sub(total);
        if remaining == 0 {
            warn!("Response body truncated at {} bytes", total);
            break;
        }
        let take = chunk.len().min(remaining);
        body.extend_from_slice(&chunk[..take]);
        total += take;
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_with_scheme() {
        let url = Fetcher::resolve_url("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_resolve_url_without_scheme_assumes_https() {
        let url = Fetcher::resolve_url("example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_resolve_url_bare_domain() {
        let url = Fetcher::resolve_url("www.example.es").unwrap();
        assert_eq!(url.as_str(), "https://www.example.es/");
    }

    #[test]
    fn test_resolve_url_invalid() {
        let result = Fetcher::resolve_url("https://");
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }
}
