//! loggrep - Stream live grep results over rotating server logs to the browser.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loggrep::config::{ConfigLoader, LogCatalog, LoggrepConfig};
use loggrep::parser::ParserChain;
use loggrep::registry::ProcessRegistry;
use loggrep::search::SearchRunner;
use loggrep::web::{AppState, Credentials, SearchServer};

#[derive(Parser)]
#[command(
    name = "loggrep",
    about = "Stream live grep results over rotating server logs to the browser",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the search server.
    Serve {
        /// Host address to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides the config file).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the log files that can be searched.
    Files {
        /// Print the list as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<LoggrepConfig, String> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    loader.load().map_err(|e| e.to_string())
}

async fn serve(config: LoggrepConfig, host: Option<String>, port: Option<u16>) -> Result<(), String> {
    let mut settings = config.server.clone();
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }

    let runner = SearchRunner::new(
        Arc::new(ProcessRegistry::new()),
        ParserChain::standard(config.parsers.timestamps),
        Arc::new(LogCatalog::new(config.log_files)),
    );
    let state = AppState::new(
        Arc::new(runner),
        Credentials::new(config.username, config.password),
    );
    let server = SearchServer::new(settings, state);

    let cancel = server.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
            cancel.cancel();
        }
    });

    server.run().await.map_err(|e| e.to_string())
}

fn list_files(config: &LoggrepConfig, json: bool) -> Result<(), String> {
    let files = LogCatalog::new(config.log_files.clone()).files();
    if json {
        let out = serde_json::to_string_pretty(&files).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        for file in files {
            println!("{file}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Files { json } => list_files(&config, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "loggrep failed");
            ExitCode::FAILURE
        }
    }
}
