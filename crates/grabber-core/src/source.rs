//! Link sources: a live page, an export file, or a local HTML file.
//!
//! Each variant produces [`LinkDescriptor`]s or a descriptive [`SourceError`];
//! the caller decides whether a failure is fatal.

use crate::error::{FetchError, SourceError};
use crate::http::{self, HttpOptions, STATUS_OK};
use crate::links::{extract_links_from_html, ExtractedLinks};
use crate::model::LinkDescriptor;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use url::Url;

/// Where link descriptors come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetch a page and extract links, resolving against the page URL.
    Url(String),
    /// Read a previously exported list; `#` lines are subdirectory headers.
    ExportFile(PathBuf),
    /// Parse a saved HTML file; only absolute links are kept.
    HtmlFile(PathBuf),
}

/// Settings shared by all sources.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub http: HttpOptions,
    /// When set, fetched page bodies are also written here (best effort).
    pub debug_html_path: Option<PathBuf>,
}

/// What a source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLinks {
    pub descriptors: Vec<LinkDescriptor>,
    /// Anchor `href`s seen before filtering; `None` for export files.
    pub total_hrefs: Option<usize>,
}

impl Source {
    /// Produces the descriptors for this source.
    pub fn read(&self, opts: &SourceOptions) -> Result<SourceLinks, SourceError> {
        match self {
            Source::Url(url) => Ok(fetch_page_links(url, opts)?.into()),
            Source::ExportFile(path) => Ok(SourceLinks {
                descriptors: read_export_file(path)?,
                total_hrefs: None,
            }),
            Source::HtmlFile(path) => Ok(read_html_file_links(path)?.into()),
        }
    }
}

impl From<ExtractedLinks> for SourceLinks {
    fn from(extracted: ExtractedLinks) -> Self {
        Self {
            descriptors: extracted
                .links
                .into_iter()
                .map(LinkDescriptor::at_root)
                .collect(),
            total_hrefs: Some(extracted.total_hrefs),
        }
    }
}

/// Fetches `url` (must answer exactly 200) and extracts links relative to it.
pub fn fetch_page_links(url: &str, opts: &SourceOptions) -> Result<ExtractedLinks, SourceError> {
    let base = Url::parse(url).map_err(|source| SourceError::InvalidBaseUrl {
        url: url.to_string(),
        source,
    })?;

    let fetch_err = |source: FetchError| SourceError::Fetch {
        url: url.to_string(),
        source,
    };
    let page = http::get_page(url, &opts.http).map_err(fetch_err)?;
    if page.status != STATUS_OK {
        return Err(fetch_err(FetchError::Status(page.status)));
    }

    if let Some(path) = &opts.debug_html_path {
        save_debug_html(path, &page.body);
    }

    let html = String::from_utf8_lossy(&page.body);
    Ok(extract_links_from_html(&html, Some(&base)))
}

fn save_debug_html(path: &Path, body: &[u8]) {
    match fs::write(path, body) {
        Ok(()) => tracing::info!(path = %path.display(), "HTML content saved"),
        Err(e) => tracing::warn!(path = %path.display(), "could not save debug HTML file: {}", e),
    }
}

/// Parses a saved HTML file and keeps absolute links only.
pub fn read_html_file_links(path: &Path) -> Result<ExtractedLinks, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);
    Ok(extract_links_from_html(&html, None))
}

/// Reads an export file, honoring `#` subdirectory headers.
pub fn read_export_file(path: &Path) -> Result<Vec<LinkDescriptor>, SourceError> {
    let file = fs::File::open(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export_lines(BufReader::new(file)).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses export-file lines.
///
/// Blank lines are skipped. `# name` (or `# ./name`) makes `name` the
/// subdirectory of every following URL until the next header.
pub fn parse_export_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<LinkDescriptor>> {
    let mut links = Vec::new();
    let mut current_subdirectory = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('#') {
            let header = header.trim();
            current_subdirectory = header.strip_prefix("./").unwrap_or(header).to_string();
        } else {
            links.push(LinkDescriptor::new(line, current_subdirectory.clone()));
        }
    }

    Ok(links)
}

/// Reads a plain list of page URLs: one per line, `#` comments and blank
/// lines ignored.
pub fn read_url_list(path: &Path) -> Result<Vec<String>, SourceError> {
    let file = fs::File::open(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut urls = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        urls.push(line.to_string());
    }
    Ok(urls)
}

/// Links gathered from a list of pages.
#[derive(Debug, Default)]
pub struct PageBatch {
    /// Links of every page that loaded, in input order.
    pub links: Vec<String>,
    /// One entry per page that was skipped.
    pub failures: Vec<SourceError>,
}

/// Scans each page in `urls` in turn. A page that fails is recorded and
/// skipped; it never stops the batch.
///
/// `on_page` sees every page's outcome as it happens (1-based index).
pub fn collect_page_links<F>(urls: &[String], opts: &SourceOptions, mut on_page: F) -> PageBatch
where
    F: FnMut(usize, &str, Result<&ExtractedLinks, &SourceError>),
{
    let mut batch = PageBatch::default();
    for (i, url) in urls.iter().enumerate() {
        match fetch_page_links(url, opts) {
            Ok(extracted) => {
                on_page(i + 1, url, Ok(&extracted));
                batch.links.extend(extracted.links);
            }
            Err(e) => {
                tracing::warn!(url = %url, "skipping page: {}", e);
                on_page(i + 1, url, Err(&e));
                batch.failures.push(e);
            }
        }
    }
    batch
}
