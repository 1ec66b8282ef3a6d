//! JIRA Reader MCP Server - read-only JIRA integration via MCP
//!
//! Exposes issue, project, board, and sprint lookups as MCP tools over a
//! STDIO transport.

use jira_reader_mcp::JiraReaderServer;
use pulseengine_mcp_server::McpServerBuilder;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configure logging for STDIO transport
    JiraReaderServer::configure_stdio_logging();

    info!("Starting JIRA Reader MCP Server...");

    // Configuration problems are fatal: no tool is registered and the
    // transport never starts
    let jira_server = match JiraReaderServer::new() {
        Ok(server) => {
            info!("JIRA Reader MCP Server created successfully");
            server
        }
        Err(e) => {
            error!("Failed to create JIRA Reader MCP Server: {}", e);
            eprintln!("Failed to start JIRA Reader MCP Server: {}", e);
            eprintln!("\nPlease check:");
            eprintln!("  - JIRA_BASE_URL environment variable is set (e.g. https://yourcompany.atlassian.net)");
            eprintln!("  - JIRA_ACCOUNT_EMAIL environment variable is set");
            eprintln!("  - JIRA_API_TOKEN environment variable is set");
            eprintln!("\nValues can also be seeded from a KEY=VALUE file (JIRA_ENV_FILE, default ./.env).");
            std::process::exit(1);
        }
    };

    info!("Starting MCP server with STDIO transport...");

    // Start the server using the macro-generated infrastructure
    let mut server = jira_server.serve_stdio().await?;

    info!("JIRA Reader MCP Server is running and ready to serve requests");

    server.run().await?;

    Ok(())
}
