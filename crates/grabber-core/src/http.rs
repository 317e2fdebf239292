//! Shared libcurl setup and the buffered page GET.
//!
//! All calls block the current thread; call from `spawn_blocking` if used
//! from async code.

use crate::error::FetchError;
use std::time::Duration;

/// HTTP status accepted for both page fetches and file downloads.
pub const STATUS_OK: u32 = 200;

/// Transport knobs applied to every curl handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    /// Maximum redirect hops followed per request.
    pub max_redirections: u32,
    /// Connect timeout; `None` leaves libcurl's default.
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            max_redirections: 10,
            connect_timeout: None,
        }
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u32,
    /// URL after redirects.
    pub effective_url: String,
    pub body: Vec<u8>,
}

/// Builds a GET handle for `url` with redirect following.
pub(crate) fn new_get(url: &str, opts: &HttpOptions) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    if let Some(timeout) = opts.connect_timeout {
        easy.connect_timeout(timeout)?;
    }
    Ok(easy)
}

/// GETs `url` and buffers the whole body. Any completed transfer is returned,
/// whatever its status; callers decide what to accept.
pub fn get_page(url: &str, opts: &HttpOptions) -> Result<PageResponse, FetchError> {
    let mut easy = new_get(url, opts)?;
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let effective_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());
    tracing::debug!(url, status, bytes = body.len(), "page fetched");

    Ok(PageResponse {
        status,
        effective_url,
        body,
    })
}

/// Parses the status code out of a header line such as `HTTP/1.1 404 Not Found`.
///
/// Returns `None` for ordinary header lines. With redirects, curl hands over
/// one status line per hop; the last one wins.
pub(crate) fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = std::str::from_utf8(line).ok()?;
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
