//! `jaktls inspect`: classify a JSON-RPC message stored in a file.

use std::fmt;
use std::fs;
use std::path::Path;

use jaktls_core::logging::targets;
use jaktls_core::{JaktlsError, JaktlsResult};
use jaktls_json::JsonString;
use jaktls_protocol::{Dump, IncomingMessage, Validate};

/// What `inspect` learned about a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: &'static str,
    pub method: String,
    pub id: Option<String>,
    /// Keys the message type does not define, in input order.
    pub leftover: Vec<String>,
    /// The message as dumped back to compact JSON, without leftover keys.
    pub json: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind:     {}", self.kind)?;
        writeln!(f, "method:   {}", self.method)?;
        if let Some(id) = &self.id {
            writeln!(f, "id:       {id}")?;
        }
        if self.leftover.is_empty() {
            writeln!(f, "leftover: (none)")?;
        } else {
            writeln!(f, "leftover: {}", self.leftover.join(", "))?;
        }
        writeln!(f, "{}", self.json)
    }
}

/// Parses and classifies one message.
pub fn inspect_text(text: &str) -> JaktlsResult<Report> {
    let value = jaktls_json::parse(text).ok_or_else(|| JaktlsError::InvalidMessage("not valid JSON".to_string()))?;
    let kind = value.kind();
    let decoded = IncomingMessage::decode(value).ok_or_else(|| {
        JaktlsError::InvalidMessage(format!("{kind} is not a JSON-RPC request or notification"))
    })?;
    let (message, leftover) = decoded.into_parts();
    log::debug!(
        target: targets::CLI,
        "decoded {} with {} unknown field(s)",
        message.method(),
        leftover.len()
    );

    Ok(Report {
        kind: if message.is_request() { "request" } else { "notification" },
        method: message.method().to_string_lossy(),
        id: message.id().map(ToString::to_string),
        leftover: leftover.keys().map(JsonString::to_string_lossy).collect(),
        json: message.into_value().to_json_string(),
    })
}

/// Reads `path` and inspects its contents.
pub fn inspect_file(path: &Path) -> JaktlsResult<Report> {
    let text = fs::read_to_string(path)?;
    inspect_text(&text)
}
