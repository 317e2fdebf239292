//! Plain URL list writer (one URL per line).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Creates or truncates `path` and writes each URL followed by a newline, in
/// order. No deduplication, no grouping headers.
pub fn write_links(urls: &[String], path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for url in urls {
        writer.write_all(url.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), count = urls.len(), "links exported");
    Ok(())
}
