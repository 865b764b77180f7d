//! Excel MCP Server binary
//!
//! Model Context Protocol server for AI agent integration.
//! Run with: `excel-mcp`
//!
//! Configure in an MCP client:
//! ```json
//! {
//!   "mcpServers": {
//!     "excel": {
//!       "command": "excel-mcp"
//!     }
//!   }
//! }
//! ```

use clap::Parser;
use excel_mcp::{logging, mcp::run_mcp_server_sync};

#[derive(Parser, Debug)]
#[command(name = "excel-mcp")]
#[command(version)]
#[command(about = "MCP server exposing read_excel and write_excel over stdio")]
struct Args {
    /// Log filter directive, e.g. "debug" or "excel_mcp=trace" (logs go to stderr)
    #[arg(long, env = "EXCEL_MCP_LOG", value_parser = logging::parse_directive)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref());

    run_mcp_server_sync()?;
    Ok(())
}
