//! `share` entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use share_cli::Cli;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    if let Err(e) = share_cli::run(&cli, stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
