//! Notes client - command-line entry point.
//!
//! Reads its settings from the environment (see `noteapp::config`), runs a
//! single command and prints the resulting view.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use noteapp::cli::{self, Command, USAGE};
use noteapp::{Config, NoteApp};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("noteapp=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}\n\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let mut app = match NoteApp::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = cli::run(&mut app, command).await;
    println!("{}", cli::render(&app));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
