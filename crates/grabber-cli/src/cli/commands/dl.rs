//! `grabber dl` – discover links and download them with a worker pool.

use anyhow::{Context, Result};
use grabber_core::config::GrabberConfig;
use grabber_core::dispatcher::{download_all, DownloadReport, JobEvent, JobObserver};
use grabber_core::source::Source;
use std::path::Path;

use super::source_options;
use crate::cli::Origin;

fn print_event(event: &JobEvent<'_>) {
    match event {
        JobEvent::Started { worker, url } => println!("[Worker {worker}] Downloading: {url}"),
        JobEvent::Saved { worker, path, .. } => {
            println!("[Worker {worker}] Saved: {}", path.display())
        }
        JobEvent::Failed { worker, error, .. } => println!("[Worker {worker}] Error: {error}"),
    }
}

fn print_summary(report: &DownloadReport) {
    println!(
        "Downloaded {} of {} files ({} failed)",
        report.succeeded(),
        report.attempted,
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  failed: {} ({})", failure.url, failure.error);
    }
}

pub async fn run_dl(
    cfg: &GrabberConfig,
    origin: Origin,
    output: &Path,
    workers: usize,
    debug: bool,
) -> Result<()> {
    let (source, what) = match origin {
        Origin::Url(url) => (Source::Url(url), "error extracting links from URL"),
        Origin::File(path) => (Source::ExportFile(path), "error reading links from file"),
        Origin::Html(path) => (Source::HtmlFile(path), "error extracting links from HTML file"),
    };
    let opts = source_options(cfg, debug);

    let found = tokio::task::spawn_blocking(move || source.read(&opts))
        .await
        .context("source task join")?
        .context(what)?;

    if let Some(total) = found.total_hrefs {
        println!("Total href attributes found: {}", total);
    }
    let links = found.descriptors;

    if links.is_empty() {
        println!("No downloadable files found");
        return Ok(());
    }
    println!("Found {} downloadable files", links.len());

    std::fs::create_dir_all(output)
        .with_context(|| format!("error creating output dir {}", output.display()))?;

    let http = cfg.http_options();
    let output = output.to_path_buf();
    let report = tokio::task::spawn_blocking(move || {
        let observer: JobObserver<'_> = &print_event;
        download_all(links, &output, workers, &http, Some(observer))
    })
    .await
    .context("download task join")?;

    print_summary(&report);
    Ok(())
}
