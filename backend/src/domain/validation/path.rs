//! Dotted field paths.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Location of a value inside the input, rendered as `visits.0.content`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The path of the input itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this path points at the input itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Extend the path with an object key.
    pub fn key(&self, name: &'static str) -> Self {
        self.with(Segment::Key(name))
    }

    /// Extend the path with an array index.
    pub fn index(&self, position: usize) -> Self {
        self.with(Segment::Index(position))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(name) => f.write_str(name)?,
                Segment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}
