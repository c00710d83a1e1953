mod cli;
mod engine;
mod entries;
mod model;
mod orchestrator;
mod storage;
#[cfg(feature = "tui")]
mod tui;
mod validate;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_headless = !args.times.is_empty();

    match cli::run(args).await {
        Ok(()) => {
            // Explicit exit code 0 for headless mode, for script usage
            if is_headless {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}
