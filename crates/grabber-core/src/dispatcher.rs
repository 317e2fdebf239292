//! Bounded worker pool that downloads every descriptor exactly once.
//!
//! The producer hands jobs over a zero-capacity channel, so it blocks until a
//! worker is free. Workers share the receiving end behind a mutex and exit
//! once the channel is closed and drained. A failed job is logged and
//! recorded; it never stops the other workers.

use crate::error::FetchError;
use crate::fetcher::fetch_file;
use crate::http::HttpOptions;
use crate::model::LinkDescriptor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Default number of concurrent download workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Progress notification emitted by workers.
#[derive(Debug)]
pub enum JobEvent<'a> {
    Started {
        worker: usize,
        url: &'a str,
    },
    Saved {
        worker: usize,
        url: &'a str,
        path: &'a Path,
    },
    Failed {
        worker: usize,
        url: &'a str,
        error: &'a FetchError,
    },
}

/// Callback receiving [`JobEvent`]s; called concurrently from worker threads.
pub type JobObserver<'o> = &'o (dyn Fn(&JobEvent<'_>) + Sync);

/// One failed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    /// 1-based worker id that ran the job.
    pub worker: usize,
    pub url: String,
    pub error: String,
}

/// Outcome of a whole dispatch run.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub attempted: usize,
    /// Saved file paths, in completion order.
    pub saved: Vec<PathBuf>,
    pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
    pub fn succeeded(&self) -> usize {
        self.saved.len()
    }
}

enum Outcome {
    Saved(PathBuf),
    Failed(DownloadFailure),
}

/// Downloads all `descriptors` into `output_root` with `workers` threads
/// (0 is treated as 1). Returns after every job has been attempted and all
/// workers have exited.
pub fn download_all(
    descriptors: Vec<LinkDescriptor>,
    output_root: &Path,
    workers: usize,
    opts: &HttpOptions,
    observer: Option<JobObserver<'_>>,
) -> DownloadReport {
    let workers = workers.max(1);
    let mut report = DownloadReport {
        attempted: descriptors.len(),
        ..DownloadReport::default()
    };
    tracing::info!(jobs = report.attempted, workers, "starting downloads");

    let (job_tx, job_rx) = mpsc::sync_channel::<LinkDescriptor>(0);
    let job_rx = Mutex::new(job_rx);
    let (result_tx, result_rx) = mpsc::channel::<Outcome>();

    thread::scope(|s| {
        for worker in 1..=workers {
            let job_rx = &job_rx;
            let result_tx = result_tx.clone();
            s.spawn(move || worker_loop(worker, job_rx, result_tx, output_root, opts, observer));
        }
        drop(result_tx);

        for descriptor in descriptors {
            if job_tx.send(descriptor).is_err() {
                tracing::error!("all download workers exited early");
                break;
            }
        }
        drop(job_tx);
    });

    for outcome in result_rx {
        match outcome {
            Outcome::Saved(path) => report.saved.push(path),
            Outcome::Failed(failure) => report.failures.push(failure),
        }
    }

    tracing::info!(
        attempted = report.attempted,
        succeeded = report.succeeded(),
        failed = report.failures.len(),
        "downloads finished"
    );
    report
}

fn worker_loop(
    worker: usize,
    jobs: &Mutex<Receiver<LinkDescriptor>>,
    results: Sender<Outcome>,
    output_root: &Path,
    opts: &HttpOptions,
    observer: Option<JobObserver<'_>>,
) {
    loop {
        let next = jobs.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(job) = next else {
            break;
        };

        let notify = |event: JobEvent<'_>| {
            if let Some(observer) = observer {
                observer(&event);
            }
        };

        tracing::debug!(worker, url = %job.url, subdirectory = %job.subdirectory, "downloading");
        notify(JobEvent::Started {
            worker,
            url: &job.url,
        });

        let outcome = match fetch_file(&job.url, output_root, &job.subdirectory, opts) {
            Ok(path) => {
                notify(JobEvent::Saved {
                    worker,
                    url: &job.url,
                    path: &path,
                });
                Outcome::Saved(path)
            }
            Err(error) => {
                tracing::warn!(worker, url = %job.url, "download failed: {}", error);
                notify(JobEvent::Failed {
                    worker,
                    url: &job.url,
                    error: &error,
                });
                Outcome::Failed(DownloadFailure {
                    worker,
                    url: job.url.clone(),
                    error: error.to_string(),
                })
            }
        };
        let _ = results.send(outcome);
    }
    tracing::trace!(worker, "worker exiting");
}
