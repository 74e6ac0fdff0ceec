//! Bracket path parsing.
//!
//! A diff location is addressed by a path string like `root['a']['b'][1]['c']`.
//! Parsing turns it into display segments, root to leaf. A sequence index that
//! directly follows a key is fused into that key's segment, so the example
//! above becomes `a`, `b[1]`, `c`.

use std::fmt;

use crate::error::{DiffError, DiffResult};

/// One display level of a [`Path`]: a map key, optionally followed by the
/// sequence indices that were applied to that key's value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// The map key.
    pub key: String,
    /// Sequence indices fused onto the key, outermost first.
    pub indices: Vec<usize>,
}

impl Segment {
    /// A plain key segment with no fused index.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            indices: Vec::new(),
        }
    }

    /// Returns `true` if this segment names an element inside a sequence.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// An ordered list of segments identifying a location in a nested document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path (the document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// The segments, root to leaf.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any.
    pub fn leaf(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Every segment but the last. Empty for paths of length zero or one.
    pub fn parent(&self) -> &[Segment] {
        match self.segments.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Parse a bracket path string into display segments.
///
/// An optional leading identifier (conventionally `root`) is skipped. After
/// it the string must consist only of `['key']`, `["key"]` or `[n]` accessors.
/// A numeric index with no preceding key is rejected, as is any unterminated
/// or unexpected token.
pub fn parse_path(input: &str) -> DiffResult<Path> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(_, c)) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            chars.next();
        } else {
            break;
        }
    }

    while let Some((pos, c)) = chars.next() {
        if c != '[' {
            return Err(DiffError::malformed_path(
                input,
                format!("expected '[' at offset {pos}, found {c:?}"),
            ));
        }

        match chars.peek().copied() {
            Some((_, quote @ ('\'' | '"'))) => {
                chars.next();
                let mut key = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, escaped)) => key.push(escaped),
                            None => break,
                        },
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => key.push(c),
                    }
                }
                if !closed {
                    return Err(DiffError::malformed_path(input, "unterminated string key"));
                }
                segments.push(Segment::key(key));
            }
            Some((_, d)) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&(_, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                let index: usize = digits
                    .parse()
                    .map_err(|_| DiffError::malformed_path(input, "index out of range"))?;
                match segments.last_mut() {
                    Some(segment) => segment.indices.push(index),
                    None => {
                        return Err(DiffError::malformed_path(
                            input,
                            "sequence index without a preceding key",
                        ))
                    }
                }
            }
            _ => {
                return Err(DiffError::malformed_path(
                    input,
                    format!("expected key or index after '[' at offset {pos}"),
                ))
            }
        }

        match chars.next() {
            Some((_, ']')) => {}
            _ => return Err(DiffError::malformed_path(input, "missing closing ']'")),
        }
    }

    Ok(Path::from(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(input: &str) -> Vec<String> {
        parse_path(input)
            .unwrap()
            .segments()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn root_alone_is_empty() {
        assert!(parse_path("root").unwrap().is_empty());
        assert!(parse_path("").unwrap().is_empty());
    }

    #[test]
    fn keys_become_segments() {
        assert_eq!(labels("root['a']['b']['c']"), vec!["a", "b", "c"]);
    }

    #[test]
    fn index_fuses_into_preceding_key() {
        assert_eq!(labels("root['a']['b'][1]['c']"), vec!["a", "b[1]", "c"]);
        let path = parse_path("root['a']['b'][1]").unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.leaf().unwrap().is_indexed());
    }

    #[test]
    fn nested_indices_stack_on_one_segment() {
        assert_eq!(labels("root['m'][0][2]"), vec!["m[0][2]"]);
    }

    #[test]
    fn double_quotes_and_escapes() {
        assert_eq!(labels(r#"root["it's"]"#), vec!["it's"]);
        assert_eq!(labels(r"root['it\'s']['a\\b']"), vec!["it's", r"a\b"]);
    }

    #[test]
    fn brackets_inside_keys_are_literal() {
        assert_eq!(labels("root['x[0]']['y']"), vec!["x[0]", "y"]);
    }

    #[test]
    fn leading_index_is_rejected() {
        let err = parse_path("root[0]['a']").unwrap_err();
        assert!(matches!(err, DiffError::MalformedPath { .. }));
    }

    #[test]
    fn unterminated_key_is_rejected() {
        assert!(matches!(
            parse_path("root['a"),
            Err(DiffError::MalformedPath { .. })
        ));
        assert!(matches!(
            parse_path("root['a'"),
            Err(DiffError::MalformedPath { .. })
        ));
    }

    #[test]
    fn stray_characters_are_rejected() {
        assert!(parse_path("root.a").is_err());
        assert!(parse_path("root[x]").is_err());
        assert!(parse_path("root['a'] ").is_err());
    }

    #[test]
    fn parent_drops_leaf() {
        let path = parse_path("root['a']['b']").unwrap();
        assert_eq!(path.parent(), &[Segment::key("a")]);
        assert!(Path::root().parent().is_empty());
        assert_eq!(path.to_string(), "a.b");
    }
}
