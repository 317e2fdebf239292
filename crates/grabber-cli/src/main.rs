use grabber_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    match logging::init_logging() {
        Ok(path) => tracing::debug!(log = %path.display(), "file logging enabled"),
        Err(e) => {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("grabber error: {:#}", err);
        std::process::exit(1);
    }
}
