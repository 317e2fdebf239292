//! CLI command handlers. Each command is in its own file.

mod dl;
mod export;

pub use dl::run_dl;
pub use export::run_export;

use grabber_core::config::GrabberConfig;
use grabber_core::source::SourceOptions;

/// Source settings for this run; the debug path is only set with `--debug`.
fn source_options(cfg: &GrabberConfig, debug: bool) -> SourceOptions {
    SourceOptions {
        http: cfg.http_options(),
        debug_html_path: debug.then(|| cfg.debug_html_path.clone()),
    }
}
