//! Filename extraction from URL path.

/// Returns the last non-empty path segment of `url`, percent-decoded.
///
/// `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()?;
    let decoded = urlencoding::decode(segment)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    if decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded)
}
