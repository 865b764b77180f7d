//! Excel MCP Server implementation
//!
//! Implements the Model Context Protocol over stdin/stdout using JSON-RPC,
//! one request per line.

use std::io::{self, BufRead, BufReader, Write};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{ExcelError, ExcelResult};
use crate::excel::{read_excel, write_excel};
use crate::types::parse_records;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "excel-mcp";

/// JSON-RPC request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }
}

/// JSON-RPC error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// MCP Tool definition
#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

/// Run the MCP server synchronously over stdin/stdout until EOF
pub fn run_mcp_server_sync() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(BufReader::new(stdin.lock()), stdout.lock())
}

/// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`
///
/// Requests are handled one at a time; each tool call finishes its file I/O
/// before the next line is read.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W) -> io::Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "Excel MCP server started");

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = handle_line(&line) {
            let encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
            writeln!(writer, "{}", encoded)?;
            writer.flush()?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Decode one line and dispatch it
///
/// Malformed JSON is a parse error (-32700). Well-formed JSON that is not a
/// request object is an invalid request (-32600), answered with its id when
/// one can be recovered.
fn handle_line(line: &str) -> Option<JsonRpcResponse> {
    let value = match serde_json::from_str::<Value>(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "unparseable JSON-RPC message");
            return Some(JsonRpcResponse::failure(
                Value::Null,
                -32700,
                format!("Parse error: {}", e),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(&request),
        Err(e) => {
            warn!(error = %e, "invalid JSON-RPC request");
            Some(JsonRpcResponse::failure(
                id,
                -32600,
                format!("Invalid Request: {}", e),
            ))
        }
    }
}

/// Handle a JSON-RPC request
///
/// Messages without an id are notifications and never get a reply.
fn handle_request(request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    let Some(id) = request.id.clone() else {
        debug!(method = %request.method, "notification");
        return None;
    };
    debug!(method = %request.method, "request");

    match request.method.as_str() {
        "initialize" => Some(JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": "Read and write Excel (.xlsx, .xlsm, .xltx, .xltm) and CSV files as JSON arrays of row objects. The first row is the header."
            }),
        )),
        "tools/list" => Some(JsonRpcResponse::success(
            id,
            json!({
                "tools": get_tools()
            }),
        )),
        "tools/call" => {
            let tool_name = request
                .params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or(json!({}));

            Some(JsonRpcResponse::success(id, call_tool(tool_name, &arguments)))
        }
        "ping" => Some(JsonRpcResponse::success(id, json!({}))),
        _ => Some(JsonRpcResponse::failure(
            id,
            -32601,
            format!("Method not found: {}", request.method),
        )),
    }
}

/// Get all available tools
fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "read_excel".to_string(),
            description: "Read an Excel or CSV file and return its rows as a JSON array of objects keyed by the header row.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the file (.xlsx, .xlsm, .xltx, .xltm or .csv)"
                    },
                    "sheet_name": {
                        "type": "string",
                        "description": "Sheet to read (Excel only; defaults to the first sheet)"
                    }
                },
                "required": ["file_path"]
            }),
        },
        Tool {
            name: "write_excel".to_string(),
            description: "Write a JSON array of objects to an Excel or CSV file. Object keys become the header row.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the file (.xlsx, .xlsm, .xltx, .xltm or .csv)"
                    },
                    "data": {
                        "type": "string",
                        "description": "JSON data in the form [{\"column1\": value1, \"column2\": value2}]"
                    },
                    "sheet_name": {
                        "type": "string",
                        "description": "Sheet name (Excel only; defaults to Sheet1)"
                    }
                },
                "required": ["file_path", "data"]
            }),
        },
    ]
}

/// Call a tool by name
fn call_tool(name: &str, arguments: &Value) -> Value {
    match name {
        "read_excel" => match read_tool(arguments) {
            Ok(text) => text_result(text, false),
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                text_result(format!("Read failed: {}", e), true)
            }
        },
        "write_excel" => match write_tool(arguments) {
            Ok(text) => text_result(text, false),
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                text_result(format!("Write failed: {}", e), true)
            }
        },
        _ => text_result(format!("Unknown tool: {}", name), true),
    }
}

fn read_tool(arguments: &Value) -> ExcelResult<String> {
    let file_path = required_str(arguments, "file_path")?;
    let sheet_name = optional_str(arguments, "sheet_name")?;
    info!(file_path, sheet_name = sheet_name.unwrap_or(""), "read_excel called");

    let records = read_excel(file_path, sheet_name)?;
    serde_json::to_string_pretty(&records)
        .map_err(|e| ExcelError::Parse(format!("Failed to encode records as JSON: {}", e)))
}

fn write_tool(arguments: &Value) -> ExcelResult<String> {
    let file_path = required_str(arguments, "file_path")?;
    let data = required_str(arguments, "data")?;
    let sheet_name = optional_str(arguments, "sheet_name")?;
    info!(file_path, sheet_name = sheet_name.unwrap_or(""), "write_excel called");

    let records = parse_records(data)?;
    write_excel(file_path, &records, sheet_name)?;
    Ok(format!("File written successfully: {}", file_path))
}

fn required_str<'a>(arguments: &'a Value, key: &str) -> ExcelResult<&'a str> {
    match arguments.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ExcelError::InvalidArgument(format!(
            "{} must be a string",
            key
        ))),
        None => Err(ExcelError::InvalidArgument(format!(
            "missing required argument {}",
            key
        ))),
    }
}

fn optional_str<'a>(arguments: &'a Value, key: &str) -> ExcelResult<Option<&'a str>> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ExcelError::InvalidArgument(format!(
            "{} must be a string",
            key
        ))),
    }
}

fn text_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": is_error
    })
}
