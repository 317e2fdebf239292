//! Single-file HTTP GET that streams the body to disk.
//!
//! The body goes to a `.part` temp file next to its destination; once the
//! transfer finishes with HTTP 200 the temp file is renamed to the name
//! derived from the post-redirect URL. Non-200 responses leave nothing behind.

use crate::error::FetchError;
use crate::http::{self, HttpOptions, STATUS_OK};
use crate::url_model::derive_filename;
use std::cell::Cell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory a download lands in: `output_root/subdirectory`, or the root
/// itself when `subdirectory` is empty. Leading `/` in `subdirectory` is
/// ignored so it always stays under the root.
pub fn target_directory(output_root: &Path, subdirectory: &str) -> PathBuf {
    let sub = subdirectory.trim_start_matches('/');
    if sub.is_empty() {
        output_root.to_path_buf()
    } else {
        output_root.join(sub)
    }
}

fn open_part(dir: &Path) -> Result<NamedTempFile, FetchError> {
    fs::create_dir_all(dir).map_err(|e| FetchError::io("error creating directory", dir, e))?;
    let mut builder = tempfile::Builder::new();
    builder.prefix(".grabber-").suffix(".part");
    // tempfile defaults to 0600; downloads should be readable like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    builder
        .tempfile_in(dir)
        .map_err(|e| FetchError::io("error creating temp file in", dir, e))
}

/// Downloads `url` into `output_root/subdirectory` and returns the final path.
///
/// Redirects are followed and the filename comes from the effective URL.
/// An existing file with the same name is replaced.
pub fn fetch_file(
    url: &str,
    output_root: &Path,
    subdirectory: &str,
    opts: &HttpOptions,
) -> Result<PathBuf, FetchError> {
    let target_dir = target_directory(output_root, subdirectory);
    let mut easy = http::new_get(url, opts)?;

    let status = Cell::new(0u32);
    let mut part: Option<NamedTempFile> = None;
    let mut write_error: Option<FetchError> = None;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Some(code) = http::parse_status_line(line) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            match status.get() {
                STATUS_OK => {}
                300..=399 => return Ok(data.len()),
                _ => return Ok(0), // abort transfer
            }
            if part.is_none() {
                match open_part(&target_dir) {
                    Ok(f) => part = Some(f),
                    Err(e) => {
                        write_error = Some(e);
                        return Ok(0);
                    }
                }
            }
            let Some(file) = part.as_mut() else {
                return Ok(0);
            };
            if let Err(e) = file.write_all(data) {
                write_error = Some(FetchError::io("error writing", file.path(), e));
                return Ok(0);
            }
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Some(err) = write_error {
        return Err(err);
    }
    if let Err(e) = perform_result {
        if e.is_write_error() && status.get() != STATUS_OK {
            return Err(FetchError::Status(status.get()));
        }
        return Err(e.into());
    }

    let code = easy.response_code()?;
    if code != STATUS_OK {
        return Err(FetchError::Status(code));
    }

    let effective_url = easy.effective_url()?.unwrap_or(url).to_string();
    let filename = derive_filename(&effective_url);
    let dest = target_dir.join(&filename);

    // Empty bodies never hit the write callback.
    let part = match part {
        Some(p) => p,
        None => open_part(&target_dir)?,
    };
    part.persist(&dest)
        .map_err(|e| FetchError::io("error saving", &dest, e.error))?;

    tracing::debug!(url, effective_url = %effective_url, dest = %dest.display(), "saved");
    Ok(dest)
}
