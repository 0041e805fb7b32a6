//! RAX File Manager - Entry Point
//!
//! Reads commands from stdin until `.exit`, end of input, or Ctrl+C.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use tokio::io::BufReader;

use rax_file_manager::navigate::change_directory;
use rax_file_manager::session::shutdown_signal;
use rax_file_manager::{Console, FileManagerConfig, Session};

/// Interactive file manager shell
#[derive(Parser, Debug)]
#[command(name = "file-manager", version, about)]
struct Args {
    /// Display name used in the greeting and farewell
    #[arg(long)]
    username: Option<String>,

    /// Directory to start in (defaults to the home directory)
    #[arg(long)]
    dir: Option<String>,

    /// Configuration file (defaults to ./file_manager.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args = Args::parse();
    let config = FileManagerConfig::load(args.config.as_deref())?
        .with_overrides(args.username, args.dir)?;

    // The start directory gets the same check as `cd`
    change_directory(&config.start_directory()).await?;

    info!("Launching file manager...");

    let session = Session::new(config, Console::stdout());
    let report = session
        .run(BufReader::new(tokio::io::stdin()), shutdown_signal())
        .await;

    info!(
        "Exiting after {:?} in {}",
        report.termination,
        report.working_directory.display()
    );

    // Blocking stdin reads and interrupted operations must not hold the process open
    std::process::exit(0);
}
