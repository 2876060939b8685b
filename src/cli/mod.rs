//! CLI adapter for prompthub
//!
//! Parses the command line, layers flags over the loaded
//! configuration, sets up logging, and dispatches to a command.
//! Running without a subcommand starts the server.

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::{parse_tokens, Config};
use crate::core::services::Services;

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "prompthub=info,tower_http=info";

/// PromptHub - serve markdown resources over HTTP and MCP
///
/// Every flag overrides the matching environment variable and config
/// file entry.
#[derive(Parser, Debug)]
#[command(name = "prompthub")]
#[command(version)]
#[command(about = "Markdown resource server over HTTP and MCP/SSE", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, short = 'p', global = true)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Comma-separated access tokens
    #[arg(long, global = true)]
    pub tokens: Option<String>,

    /// Directory containing the markdown resources
    #[arg(long, global = true)]
    pub resources_dir: Option<PathBuf>,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "PROMPTHUB_LOG_FORMAT",
        default_value = "human"
    )]
    pub log_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for logs and command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting and log shipping
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print the resource catalog and exit
    List(commands::ListArgs),
}

impl Cli {
    /// Load configuration and apply command-line overrides
    ///
    /// The result is validated, so every entry point sees the same
    /// rules regardless of where a value came from.
    pub fn resolve_config(&self) -> crate::core::error::Result<Config> {
        let mut config = Config::load_from(self.config.as_deref())?;

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(tokens) = &self.tokens {
            config.auth.tokens = parse_tokens(tokens);
        }
        if let Some(dir) = &self.resources_dir {
            config.resources.root = dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so `list` output on stdout stays clean.
pub fn init_tracing(format: OutputFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        OutputFormat::Human => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        OutputFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    init_tracing(cli.log_format);

    let config = cli.resolve_config()?;
    let services = Arc::new(Services::new(config));

    match cli.command {
        None | Some(Commands::Serve) => commands::serve::execute(services).await,
        Some(Commands::List(args)) => commands::list::execute(args, &services).await,
    }
}
