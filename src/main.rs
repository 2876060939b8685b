//! PromptHub server entry point
//!
//! Serves a directory of markdown resources over REST and MCP/SSE.
//!
//! ```bash
//! # Serve ./example on port 8080
//! TOKENS=secret prompthub
//!
//! # Print the catalog of another directory
//! prompthub --resources-dir ./prompts list --format json
//! ```

use clap::Parser;
use prompthub::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
