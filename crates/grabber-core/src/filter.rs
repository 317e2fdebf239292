//! Extension allow-list: decides whether a URL points at a downloadable file.
//!
//! The last path segment is checked first, then every query value, so links
//! like `download.php?f=report.pdf` are recognized too.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercase file extensions (no leading dot) treated as downloadable.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "webp", "bmp",
    // documents
    "pdf", "doc", "docx", "txt", "rtf", "xls", "xlsx", "ppt", "pptx",
    // video
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm",
    // audio
    "mp3", "wav", "flac", "aac", "ogg",
    // archives
    "zip", "rar", "7z", "tar", "gz", "bz2",
    // executables and packages
    "exe", "msi", "dmg", "pkg", "deb", "rpm",
    // disk images
    "iso", "img", "bin",
    // mobile packages
    "apk", "ipa",
    // web assets
    "css", "js", "json", "xml", "csv",
];

static ALLOWED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ALLOWED_EXTENSIONS.iter().copied().collect());

/// Returns the lowercased suffix after the final `.` of `name`.
///
/// `None` when there is no dot or the name ends with one.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn is_allowed(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ALLOWED.contains(ext.as_str()))
}

/// True if the URL's last path segment or any query value carries an
/// allow-listed extension. Unparseable URLs are never downloadable.
///
/// A trailing `/` makes the last segment empty, so directory links such as
/// `http://mirror/pub/debian.iso/` are rejected.
pub fn is_downloadable(url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };

    let last_segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(|s| {
            urlencoding::decode(s)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| s.to_string())
        });
    if last_segment.as_deref().is_some_and(is_allowed) {
        return true;
    }

    parsed.query_pairs().any(|(_, value)| is_allowed(&value))
}
