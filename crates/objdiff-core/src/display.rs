//! Value formatting for rendered diff lines.

use serde_json::Value;

use crate::error::{DiffError, DiffResult};

/// Format a value for a single `key: value` line.
///
/// Top-level strings are shown bare unless they hold control characters,
/// which are escaped so the value stays on one line. Maps and sequences use
/// a compact flow form; strings nested inside them are quoted only when they
/// would be ambiguous there.
pub fn inline(value: &Value) -> String {
    match value {
        Value::String(s) => label(s),
        other => flow(other),
    }
}

/// Format a map key or bare string so it occupies exactly one line.
pub fn label(s: &str) -> String {
    if s.contains(char::is_control) {
        quoted(s)
    } else {
        s.to_string()
    }
}

fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn flow(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => flow_string(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(flow).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", flow_string(k), flow(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn flow_string(s: &str) -> String {
    let ambiguous = s.is_empty()
        || s.trim() != s
        || s.contains(|c: char| {
            c.is_control() || matches!(c, ',' | ':' | '{' | '}' | '[' | ']' | '"' | '#')
        });
    if ambiguous {
        quoted(s)
    } else {
        s.to_string()
    }
}

/// Serialize a value as a YAML block, one entry per returned line.
pub fn block(value: &Value) -> DiffResult<Vec<String>> {
    let yaml = serde_yaml::to_string(value)
        .map_err(|e| DiffError::Serialization(e.to_string()))?;
    Ok(yaml.trim_end().lines().map(str::to_string).collect())
}
