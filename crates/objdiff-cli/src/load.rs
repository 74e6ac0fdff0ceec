//! Reading JSON or YAML documents from disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Read and parse a document. YAML is a superset of JSON, so one parser
/// serves both formats.
pub fn load_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}.", path.display()))?;
    parse_document(&text)
        .with_context(|| format!("Unrecognized object notation in {}.", path.display()))
}

fn parse_document(text: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(text)
}
