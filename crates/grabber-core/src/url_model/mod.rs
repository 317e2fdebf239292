//! Local filename derivation from the (post-redirect) response URL.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

/// Used when the URL path yields nothing usable (e.g. `https://host/`).
pub const DEFAULT_FILENAME: &str = "download.bin";

/// Derives the filename a download is saved under: the last path segment of
/// `url`, percent-decoded and sanitized, or [`DEFAULT_FILENAME`].
///
/// - `derive_filename("https://example.com/a/archive.zip")` → `"archive.zip"`
/// - `derive_filename("https://example.com/")` → `"download.bin"`
pub fn derive_filename(url: &str) -> String {
    let Some(raw) = filename_from_url_path(url) else {
        return DEFAULT_FILENAME.to_string();
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}
