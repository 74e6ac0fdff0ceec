//! Top-level entry points: render a grouped diff, or compare and render.

use std::io::Write;

use serde_json::Value;
use tracing::debug;

use crate::change::GroupedDiff;
use crate::compare::compare_values;
use crate::error::DiffResult;
use crate::normalize::normalize_diffs;
use crate::options::DiffOptions;
use crate::render::Renderer;

/// Line printed in place of a diff body when nothing changed.
pub const NO_DIFFERENCES: &str = "No differences";

/// Outcome of a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffStatus {
    Identical,
    Different,
}

impl DiffStatus {
    /// `0` when identical, `1` when differences were printed.
    pub fn exit_code(self) -> u8 {
        match self {
            DiffStatus::Identical => 0,
            DiffStatus::Different => 1,
        }
    }
}

/// Normalize and render an already computed grouped diff.
///
/// Output is buffered until every record has rendered, so a malformed path,
/// unsupported category, or bad payload leaves `out` untouched.
pub fn render_grouped<W: Write>(
    diff: &GroupedDiff,
    options: &DiffOptions,
    out: &mut W,
) -> DiffResult<DiffStatus> {
    let records = normalize_diffs(diff)?;
    if records.is_empty() {
        writeln!(out, "{NO_DIFFERENCES}")?;
        return Ok(DiffStatus::Identical);
    }

    let mut body = Vec::new();
    Renderer::from_options(options).render(&records, &mut body)?;
    out.write_all(&body)?;
    debug!(records = records.len(), "rendered diff");
    Ok(DiffStatus::Different)
}

/// Compare two documents and render the result.
pub fn diff_values<W: Write>(
    old: &Value,
    new: &Value,
    options: &DiffOptions,
    out: &mut W,
) -> DiffResult<DiffStatus> {
    let diff = compare_values(old, new);
    render_grouped(&diff, options, out)
}
