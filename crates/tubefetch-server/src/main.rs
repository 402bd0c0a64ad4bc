use clap::Parser;
use tubefetch_core::logging;

mod cli;
mod http;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; fall back to stderr if the
    // state directory is unusable.
    if cli.wants_stderr_logging() {
        logging::init_logging_stderr();
    } else if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = cli.run().await {
        eprintln!("tubefetch error: {:#}", err);
        std::process::exit(1);
    }
}
