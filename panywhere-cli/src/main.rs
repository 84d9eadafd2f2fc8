mod commands;
mod transport;

#[cfg(test)]
mod test_support;

use std::io::{self, Write};
use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use panywhere_core::config::Config;

use crate::commands::CommandResult;
use crate::transport::HttpTransport;

const USAGE: &str = "usage: panywhere <cpu|upload|get|remove|reload|upload-hook> [path]";

#[derive(Parser, Debug)]
#[command(
    name = "panywhere",
    version,
    about = "Manage files and web apps on a PythonAnywhere account"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Show the account's CPU quota usage
    Cpu,

    /// Upload a file to the same relative path under the site directory
    Upload {
        /// Local file path, relative to the current directory
        path: Option<String>,
    },

    /// Download a file, or list a directory, from the site directory
    Get {
        /// Path relative to the site directory
        path: Option<String>,
    },

    /// Delete a file from the site directory after confirmation
    Remove {
        /// Path relative to the site directory
        path: Option<String>,
    },

    /// Reload the web app
    Reload,

    /// Install a git pre-commit hook that uploads every staged file
    #[command(name = "upload-hook")]
    UploadHook,

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing (controlled by RUST_LOG env var). Logs go to stderr
    // so command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("You need to specify an action.");
        eprintln!("{USAGE}");
        std::process::exit(-1);
    };

    // Load .env file if present (non-fatal if missing).
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    if let Err(e) = run(command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> CommandResult {
    let workdir = Path::new(".");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Cpu => {
            let config = Config::from_env()?;
            commands::cpu::run_cpu(&HttpTransport::new(&config), &mut out).await
        }
        Commands::Upload { path } => {
            let path = require_path("upload", path);
            let config = Config::from_env()?;
            let api = HttpTransport::new(&config);
            commands::upload::run_upload(&api, &config, workdir, &path, &mut out).await
        }
        Commands::Get { path } => {
            let path = require_path("get", path);
            let config = Config::from_env()?;
            let api = HttpTransport::new(&config);
            commands::get::run_get(&api, &config, workdir, &path, &mut out).await
        }
        Commands::Remove { path } => {
            let path = require_path("remove", path);
            let config = Config::from_env()?;
            let api = HttpTransport::new(&config);
            let stdin = io::stdin();
            commands::remove::run_remove(&api, &config, &path, &mut stdin.lock(), &mut out).await
        }
        Commands::Reload => {
            let config = Config::from_env()?;
            commands::reload::run_reload(&HttpTransport::new(&config), &mut out).await
        }
        Commands::UploadHook => {
            commands::hook::run_install_hook(workdir, &hook_program(), &mut out).await
        }
        Commands::Unknown(args) => {
            let action = args.first().map(String::as_str).unwrap_or_default();
            writeln!(out, "Unknown action '{action}'")?;
            Ok(())
        }
    }
}

/// Exit with a usage message when a file command was given no path.
fn require_path(action: &str, path: Option<String>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => path,
        None => {
            eprintln!("You need to specify a file path");
            eprintln!("usage: panywhere {action} <fileName>");
            std::process::exit(-1);
        }
    }
}

/// Command the pre-commit hook runs: this binary's own path when it can be
/// resolved, otherwise the name it was invoked by.
fn hook_program() -> String {
    std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| {
            std::env::args()
                .next()
                .unwrap_or_else(|| "panywhere".to_string())
        })
}
