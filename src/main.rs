//! ABCD Nutritional Reference Engine
//!
//! An MCP server for youth-athlete nutritional assessment.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use abcd::build_info;
use abcd::config::EngineConfig;
use abcd::mcp::AbcdService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("abcd=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::from_env();
    if let Some(path) = &config.reference_path {
        eprintln!("Loading reference data from {}", path.display());
    }

    // Invalid reference data aborts startup
    let store = Arc::new(config.build_store()?);

    build_info::print_startup_banner(&store);
    eprintln!("Starting MCP server on stdio...");

    let service = AbcdService::new(store);
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
