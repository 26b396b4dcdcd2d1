//! Reduce a raw model answer to a validated connection map.
//!
//! The response is untrusted: prose, reasoning blocks, and fences around
//! the payload are stripped first, then the outermost braces bound the JSON
//! candidate. Structural failures are `Parse` errors with a diagnostic
//! excerpt; per-field anomalies inside a parseable object never fail.

use crate::core::error::{Result, VisionError};
use crate::hex::{EdgeConnection, HexDirection, TileConnections};
use crate::vision::sanitize::sanitize;

/// Longest diagnostic excerpt attached to parse errors.
const EXCERPT_LEN: usize = 160;

/// Validate a raw response into a per-edge connection map.
pub fn parse_connections(raw: &str) -> Result<TileConnections> {
    let cleaned = sanitize(raw);
    let candidate = extract_object(&cleaned).ok_or_else(|| VisionError::Parse {
        message: "no JSON object found in response".into(),
        excerpt: excerpt(raw),
    })?;

    let value: serde_json::Value =
        serde_json::from_str(candidate).map_err(|e| VisionError::Parse {
            message: format!("response JSON rejected: {}", e),
            excerpt: excerpt(candidate),
        })?;

    Ok(collect_connections(&value))
}

/// Substring from the first `{` to the last `}` inclusive, or None when
/// either brace is absent or the last does not come after the first.
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Per-field validation is lenient: null, the "unknown"
/// sentinel, wrong-typed values, and unrecognized names all degrade to
/// "no connection" instead of failing the parse.
fn collect_connections(value: &serde_json::Value) -> TileConnections {
    let mut connections = TileConnections::new();
    let Some(map) = value.get("connections").and_then(|v| v.as_object()) else {
        return connections;
    };

    for direction in HexDirection::ALL {
        let Some(raw) = map.get(direction.label()) else {
            continue;
        };
        let Some(name) = raw.as_str() else {
            continue;
        };
        if let Some(connection) = EdgeConnection::parse_lenient(name) {
            connections.insert(direction, connection);
        }
    }
    connections
}

/// Head of `text` for error messages, trimmed and kept on a char boundary.
pub(crate) fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= EXCERPT_LEN {
        return trimmed.to_string();
    }
    let mut end = EXCERPT_LEN;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
