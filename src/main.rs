//! Standalone entry point: parses CLI flags, wires the engine together,
//! and exits with its run's status code.

use clap::Parser;

use dork_scraper::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = dork_scraper::cli::run(cli).await;
    std::process::exit(code);
}
