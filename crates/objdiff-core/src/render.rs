//! Hierarchical rendering of a normalized change stream.
//!
//! Each record is printed under its ancestor keys, YAML style, two spaces per
//! level. A [`RenderState`] remembers which ancestor headers are already on
//! screen so consecutive records sharing a prefix do not repeat them.

use std::io::Write;

use colored::Colorize;
use serde_json::Value;
use tracing::debug;

use crate::change::{ChangeKind, ChangeRecord, Payload};
use crate::display;
use crate::error::{DiffError, DiffResult};
use crate::options::DiffOptions;
use crate::path::{parse_path, Path, Segment};

const INDENT: &str = "  ";

/// The role of a printed line, which picks its marker and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Ancestor headers: space marker, never colored.
    Plain,
    /// `+` lines.
    Added,
    /// `-` lines.
    Removed,
}

impl Tone {
    /// The first character of every line in this tone.
    pub fn marker(self) -> char {
        match self {
            Tone::Plain => ' ',
            Tone::Added => '+',
            Tone::Removed => '-',
        }
    }
}

/// Two-color policy: green additions, red removals, or no styling at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    /// Build the palette the options ask for.
    pub fn from_options(options: &DiffOptions) -> Self {
        Self {
            color: options.color,
        }
    }

    /// A palette that never applies color.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Apply the color for `tone` to a whole line.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Added => text.green().to_string(),
            Tone::Removed => text.red().to_string(),
        }
    }
}

/// The ancestor path whose headers have already been printed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
    current_level: Vec<Segment>,
}

impl RenderState {
    /// Create a state with no headers shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ancestor segments whose headers are currently on screen.
    pub fn current_level(&self) -> &[Segment] {
        &self.current_level
    }

    fn reset(&mut self) {
        self.current_level.clear();
    }

    fn enter(&mut self, level: &[Segment]) {
        self.current_level = level.to_vec();
    }
}

/// Prints change records as indented, de-duplicated hierarchical output.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    /// Create a renderer that styles lines with `palette`.
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Create a renderer configured from `options`.
    pub fn from_options(options: &DiffOptions) -> Self {
        Self::new(Palette::from_options(options))
    }

    /// Render a whole stream with a fresh state, returning the final state.
    pub fn render<W: Write>(
        &self,
        records: &[ChangeRecord],
        out: &mut W,
    ) -> DiffResult<RenderState> {
        let mut state = RenderState::new();
        for record in records {
            self.render_record(&mut state, record, out)?;
        }
        Ok(state)
    }

    /// Render a single record, emitting any ancestor headers not yet shown.
    pub fn render_record<W: Write>(
        &self,
        state: &mut RenderState,
        record: &ChangeRecord,
        out: &mut W,
    ) -> DiffResult<()> {
        let path = parse_path(&record.path)?;
        debug!(kind = %record.kind, path = %record.path, "rendering change");

        match (record.kind, &record.payload) {
            (ChangeKind::DictionaryItemAdded, Payload::Value(value)) => {
                self.dictionary_item(state, record, &path, value, Tone::Added, out)
            }
            (ChangeKind::DictionaryItemRemoved, Payload::Value(value)) => {
                self.dictionary_item(state, record, &path, value, Tone::Removed, out)
            }
            (ChangeKind::IterableItemAdded, Payload::Value(value)) => {
                self.iterable_item(state, record, &path, value, Tone::Added, out)
            }
            (ChangeKind::IterableItemRemoved, Payload::Value(value)) => {
                self.iterable_item(state, record, &path, value, Tone::Removed, out)
            }
            (ChangeKind::ValuesChanged, Payload::Changed { old, new }) => {
                self.values_changed(state, &path, old, new, out)
            }
            (kind, _) => Err(DiffError::MalformedPayload {
                category: kind.to_string(),
                path: record.path.clone(),
            }),
        }
    }

    fn dictionary_item<W: Write>(
        &self,
        state: &mut RenderState,
        record: &ChangeRecord,
        path: &Path,
        value: &Value,
        tone: Tone,
        out: &mut W,
    ) -> DiffResult<()> {
        let Some(key) = path.leaf() else {
            return Err(DiffError::malformed_path(&record.path, "map item has no key"));
        };
        let key = display::label(&key.to_string());
        let value = display::inline(value);

        if path.len() == 1 {
            self.line(out, tone, 0, &format!("{key}: {value}"))?;
            state.reset();
            return Ok(());
        }

        let parent = path.parent();
        let depth = self.headers(state, parent, out)?;
        let bullet = if parent.last().is_some_and(Segment::is_indexed) {
            "- "
        } else {
            ""
        };
        self.line(out, tone, depth, &format!("{bullet}{key}: {value}"))?;
        state.enter(parent);
        Ok(())
    }

    fn iterable_item<W: Write>(
        &self,
        state: &mut RenderState,
        record: &ChangeRecord,
        path: &Path,
        value: &Value,
        tone: Tone,
        out: &mut W,
    ) -> DiffResult<()> {
        if path.is_empty() {
            let reason = "sequence item has no container";
            return Err(DiffError::malformed_path(&record.path, reason));
        }

        let depth = self.headers(state, path.segments(), out)?;
        let lines = display::block(value)?;
        for (i, text) in lines.iter().enumerate() {
            let lead = if i == 0 { "- " } else { INDENT };
            self.line(out, tone, depth, &format!("{lead}{text}"))?;
        }
        state.enter(path.segments());
        Ok(())
    }

    fn values_changed<W: Write>(
        &self,
        state: &mut RenderState,
        path: &Path,
        old: &Value,
        new: &Value,
        out: &mut W,
    ) -> DiffResult<()> {
        let (old, new) = (display::inline(old), display::inline(new));

        let Some(key) = path.leaf() else {
            self.line(out, Tone::Removed, 0, &old)?;
            self.line(out, Tone::Added, 0, &new)?;
            state.reset();
            return Ok(());
        };
        let key = display::label(&key.to_string());

        if path.len() == 1 {
            self.line(out, Tone::Removed, 0, &format!("{key}: {old}"))?;
            self.line(out, Tone::Added, 0, &format!("{key}: {new}"))?;
            state.reset();
            return Ok(());
        }

        let parent = path.parent();
        let depth = self.headers(state, parent, out)?;
        self.line(out, Tone::Removed, depth, &format!("{key}: {old}"))?;
        self.line(out, Tone::Added, depth, &format!("{key}: {new}"))?;
        state.enter(parent);
        Ok(())
    }

    /// Print headers for every segment of `ancestors` past the prefix already
    /// shown, and return the depth at which leaf lines go.
    fn headers<W: Write>(
        &self,
        state: &RenderState,
        ancestors: &[Segment],
        out: &mut W,
    ) -> DiffResult<usize> {
        let shown = state
            .current_level
            .iter()
            .zip(ancestors)
            .take_while(|(current, wanted)| current == wanted)
            .count();
        for (depth, segment) in ancestors.iter().enumerate().skip(shown) {
            let label = display::label(&segment.to_string());
            self.line(out, Tone::Plain, depth, &format!("{label}:"))?;
        }
        Ok(ancestors.len())
    }

    fn line<W: Write>(
        &self,
        out: &mut W,
        tone: Tone,
        depth: usize,
        body: &str,
    ) -> DiffResult<()> {
        let text = format!("{}{}{}", tone.marker(), INDENT.repeat(depth), body);
        writeln!(out, "{}", self.palette.paint(&text, tone))?;
        Ok(())
    }
}
