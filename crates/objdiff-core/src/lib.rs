//! Hierarchical diff rendering for nested data documents.
//!
//! Takes a structural diff grouped by change category (the shape produced by
//! a deep-diff collaborator), flattens it into a single path-ordered stream,
//! and prints it as indented, YAML-like output that names each ancestor key
//! only once.
//!
//! # Key Types
//!
//! - [`Path`] / [`Segment`] -- Parsed bracket paths such as `root['a']['b'][1]`
//! - [`ChangeKind`] / [`ChangeRecord`] / [`GroupedDiff`] -- Diff data model
//! - [`Renderer`] / [`RenderState`] -- Stateful hierarchical printer
//! - [`DiffStatus`] -- Outcome of a render pass (maps to the process exit code)

pub mod change;
pub mod compare;
pub mod display;
pub mod error;
pub mod normalize;
pub mod options;
pub mod path;
pub mod render;
pub mod report;

pub use change::{ChangeKind, ChangeRecord, GroupedDiff, Payload};
pub use compare::compare_values;
pub use error::{DiffError, DiffResult};
pub use normalize::normalize_diffs;
pub use options::DiffOptions;
pub use path::{parse_path, Path, Segment};
pub use render::{Palette, RenderState, Renderer, Tone};
pub use report::{diff_values, render_grouped, DiffStatus};
