//! libcurl-backed transport: one blocking GET per call, body streamed into memory.

use std::str;
use std::time::Duration;

use super::classify::classify_curl_error;
use super::parse::{parse_headers, parse_status_line};
use super::{HttpResponse, HttpTransport, TransportError, DEFAULT_TIMEOUT_SECS};

const MAX_REDIRECTS: u32 = 10;

/// GET over libcurl with a total timeout. Redirects are followed transparently.
///
/// Each call builds its own `Easy` handle, so concurrent calls from worker
/// threads do not share state and time out independently.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl CurlTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn perform(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut status_line: Option<(u32, String)> = None;
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    // A new status line starts a new response (redirect hop);
                    // only the final response's headers count.
                    if let Some(parsed) = parse_status_line(s) {
                        status_line = Some(parsed);
                        header_lines.clear();
                    } else {
                        header_lines.push(s.trim_end().to_string());
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let reason = match status_line {
            Some((code, reason)) if code == status => reason,
            _ => String::new(),
        };

        Ok(HttpResponse {
            status,
            reason,
            headers: parse_headers(&header_lines),
            body,
        })
    }
}

impl HttpTransport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| TransportError::Other(format!("invalid URL {}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::Other(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        tracing::debug!(url = %url, timeout_secs = self.timeout.as_secs(), "GET");
        self.perform(url).map_err(|e| classify_curl_error(&e))
    }
}
