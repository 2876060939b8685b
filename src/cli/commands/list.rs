//! List command - print the resource catalog

use std::sync::Arc;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Catalog, ResourcesResponse};

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "human")]
    pub format: OutputFormat,
}

/// Execute the list command
///
/// Build problems are reported on stderr; whatever could be indexed
/// is still printed.
pub async fn execute(
    args: ListArgs,
    services: &Arc<Services>,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = services.catalog().await;
    for reason in outcome.reasons() {
        eprintln!("Warning: {reason}");
    }

    println!("{}", render(&outcome.into_value(), args.format)?);
    Ok(())
}

fn render(catalog: &Catalog, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ResourcesResponse {
            resources: catalog.entries().to_vec(),
        }),
        OutputFormat::Human => {
            if catalog.is_empty() {
                return Ok("No resources found.".to_string());
            }

            let mut lines = vec![format!("Resources ({}):", catalog.len())];
            for entry in catalog.entries() {
                lines.push(format!("  {}", entry.uri));
                lines.push(format!("    name: {}", entry.name));
                if entry.description != entry.name {
                    lines.push(format!("    description: {}", entry.description));
                }
            }
            Ok(lines.join("\n"))
        }
    }
}
