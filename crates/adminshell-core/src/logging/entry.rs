//! One line of the JSONL diagnostics log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single self-contained log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 timestamp with milliseconds, UTC
    pub ts: String,

    /// trace, debug, info, warn, error
    pub level: String,

    /// Module path the event came from (e.g. "adminshell_core::theme")
    pub target: String,

    pub msg: String,

    /// Structured event fields (`base_color`, `error`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,

    /// Enclosing spans, outermost first, joined with " > "
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
}

impl LogEntry {
    pub fn new(level: impl Into<String>, target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: level.into(),
            target: target.into(),
            msg: msg.into(),
            fields: None,
            span: None,
        }
    }

    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }

    /// Serialize to a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_line_shape() {
        let entry = LogEntry::new("error", "adminshell_core::color", "Failed to generate color gradations")
            .with_fields(serde_json::json!({ "base_color": "not-a-color" }));

        let json = entry.to_json_line().unwrap();
        assert!(json.contains("\"level\":\"error\""));
        assert!(json.contains("\"base_color\":\"not-a-color\""));
        assert!(!json.contains("\"span\""));

        let parsed = LogEntry::from_json_line(&json).unwrap();
        assert_eq!(parsed.target, "adminshell_core::color");
    }

    #[test]
    fn test_timestamp_is_utc_millis() {
        let entry = LogEntry::new("info", "t", "m");
        assert!(entry.ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.ts).is_ok());
    }
}
