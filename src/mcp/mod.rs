//! Excel MCP Server
//!
//! Model Context Protocol server that lets AI agents read and write
//! spreadsheet and CSV files as JSON records.
//!
//! ## Tools
//!
//! - `read_excel` - Read a sheet (or CSV file) into a JSON array of row objects
//! - `write_excel` - Write a JSON array of row objects to a new file
//!
//! ## Usage
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

pub mod server;

pub use server::{run_mcp_server_sync, serve};
