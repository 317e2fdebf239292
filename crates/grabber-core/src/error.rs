//! Error types for page fetching, source reading and file downloads.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single download (curl failure, HTTP error, or disk failure).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection, TLS, redirect loop, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Final response status was not 200.
    #[error("bad status: HTTP {0}")]
    Status(u32),
    /// Creating the directory or writing the file failed.
    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

/// Failure to produce link descriptors from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
