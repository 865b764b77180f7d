//! Tracing setup shared by both binaries
//!
//! Logs always go to stderr: stdout carries MCP responses and CLI output.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `--log-level` nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "excel_mcp=info";

/// clap value parser for `--log-level` / `EXCEL_MCP_LOG`
///
/// Rejects directives `EnvFilter` cannot parse, so a typo fails at startup
/// instead of quietly logging at the default level.
pub fn parse_directive(directive: &str) -> Result<String, String> {
    EnvFilter::try_new(directive)
        .map(|_| directive.to_string())
        .map_err(|e| format!("invalid log filter {:?}: {}", directive, e))
}

/// Install the global subscriber
///
/// `directive` (from `--log-level` / `EXCEL_MCP_LOG`) wins over `RUST_LOG`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(directive: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn build_filter(directive: Option<&str>) -> EnvFilter {
    if let Some(directive) = directive {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return filter,
            // The subscriber is not up yet, so this cannot go through tracing
            Err(e) => eprintln!("warning: ignoring invalid log filter {:?}: {}", directive, e),
        }
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive_accepts_levels_and_targets() {
        assert_eq!(parse_directive("debug").unwrap(), "debug");
        assert_eq!(
            parse_directive("excel_mcp=trace,warn").unwrap(),
            "excel_mcp=trace,warn"
        );
    }

    #[test]
    fn test_parse_directive_rejects_unknown_level() {
        let err = parse_directive("excel_mcp=loud").unwrap_err();
        assert!(err.contains("excel_mcp=loud"), "{}", err);
    }

    #[test]
    fn test_build_filter_uses_valid_directive() {
        assert_eq!(build_filter(Some("excel_mcp=trace")).to_string(), "excel_mcp=trace");
    }
}
