//! `grabber export` – write discovered links to a text file.

use anyhow::{Context, Result};
use grabber_core::config::GrabberConfig;
use grabber_core::export::write_links;
use grabber_core::source::{
    collect_page_links, fetch_page_links, read_html_file_links, read_url_list, SourceOptions,
};
use std::path::{Path, PathBuf};

use super::source_options;
use crate::cli::Origin;

/// Scans every page listed in `list`, skipping pages that fail.
fn collect_from_url_list(list: &Path, opts: &SourceOptions) -> Result<Vec<String>> {
    let urls = read_url_list(list).context("error reading URLs from file")?;
    println!("Processing {} URLs from file...", urls.len());

    let batch = collect_page_links(&urls, opts, |index, url, outcome| {
        println!("Processing URL {}/{}: {}", index, urls.len(), url);
        match outcome {
            Ok(extracted) => println!(
                "Found {} downloadable files from {}",
                extracted.links.len(),
                url
            ),
            Err(e) => println!("Warning: {}", e),
        }
    });
    if !batch.failures.is_empty() {
        println!("Skipped {} of {} pages", batch.failures.len(), urls.len());
    }
    Ok(batch.links)
}

fn collect_links(origin: &Origin, opts: &SourceOptions) -> Result<Vec<String>> {
    let extracted = match origin {
        Origin::Url(url) => {
            fetch_page_links(url, opts).context("error extracting links from URL")?
        }
        Origin::Html(path) => {
            read_html_file_links(path).context("error extracting links from HTML file")?
        }
        Origin::File(path) => return collect_from_url_list(path, opts),
    };
    println!("Total href attributes found: {}", extracted.total_hrefs);
    Ok(extracted.links)
}

pub async fn run_export(
    cfg: &GrabberConfig,
    origin: Origin,
    output: &Path,
    debug: bool,
) -> Result<()> {
    let opts = source_options(cfg, debug);
    let output: PathBuf = output.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let links = collect_links(&origin, &opts)?;
        if links.is_empty() {
            println!("No downloadable files found");
            return Ok(());
        }
        println!("Total downloadable files found: {}", links.len());

        write_links(&links, &output)
            .with_context(|| format!("error writing links to {}", output.display()))?;
        println!("URLs exported to: {}", output.display());
        Ok(())
    })
    .await
    .context("export task join")?
}
