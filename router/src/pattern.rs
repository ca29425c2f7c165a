//! Route pattern parsing.
//!
//! A pattern is a list of `/` separated segments:
//!
//! - `:name` matches exactly one path segment.
//! - `&name` matches one path segment when present and may be left out at the end of a path.
//! - `@name` matches every remaining path segment and must be the last segment of a pattern.
//! - anything else is matched literally.
//!
//! Empty segments produced by leading, trailing or repeated slashes are dropped.

use crate::InsertError;

/// A single parsed segment of a route pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact text equality.
    Literal(String),
    /// Matches any single segment and binds it to the name.
    Named(String),
    /// Like [Segment::Named] but may be absent at the end of a path.
    OptionalNamed(String),
    /// Binds all remaining segments, slash joined, to the name.
    Greedy(String),
}

impl Segment {
    fn parse(segment: &str) -> Result<Self, InsertError> {
        let (ctor, name): (fn(String) -> Segment, &str) = match segment.as_bytes()[0] {
            b':' => (Segment::Named, &segment[1..]),
            b'&' => (Segment::OptionalNamed, &segment[1..]),
            b'@' => (Segment::Greedy, &segment[1..]),
            _ => return Ok(Segment::Literal(segment.to_owned())),
        };

        if name.is_empty() {
            return Err(InsertError::UnnamedParam);
        }

        Ok(ctor(name.to_owned()))
    }

    /// Parameter name bound by this segment. `None` for literal segments.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Named(name) | Self::OptionalNamed(name) | Self::Greedy(name) => Some(name),
        }
    }

    /// Whether a request path must provide this segment.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Literal(_) | Self::Named(_))
    }
}

/// A validated route pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a route pattern.
    ///
    /// # Examples
    /// ```rust
    /// # use flash_router::pattern::{Pattern, Segment};
    /// let pattern = Pattern::parse("/files/:id/@rest").unwrap();
    /// assert_eq!(
    ///     pattern.segments(),
    ///     &[
    ///         Segment::Literal("files".into()),
    ///         Segment::Named("id".into()),
    ///         Segment::Greedy("rest".into()),
    ///     ]
    /// );
    ///
    /// assert!(Pattern::parse("/@rest/files").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self, InsertError> {
        Self::parse_with_extras(source, &[])
    }

    /// Parse a route pattern and append `extras` to it as optional trailing segments.
    ///
    /// This is how a resource registered as `/pages` still accepts `/pages/1` and `/pages/1/edit`
    /// with `extras` being `["id", "action"]`.
    pub fn parse_with_extras(source: &str, extras: &[&str]) -> Result<Self, InsertError> {
        let mut segments = source
            .split('/')
            .filter(|s| !s.is_empty())
            .map(Segment::parse)
            .collect::<Result<Vec<_>, _>>()?;

        // "" and "/" are the root. anything else made of slashes only is a typo.
        if segments.is_empty() && source.len() > 1 {
            return Err(InsertError::Empty);
        }

        for extra in extras {
            if extra.is_empty() {
                return Err(InsertError::UnnamedParam);
            }
            segments.push(Segment::OptionalNamed((*extra).to_owned()));
        }

        validate(&segments)?;

        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    /// The text this pattern was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate over parameter names in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param)
    }
}

fn validate(segments: &[Segment]) -> Result<(), InsertError> {
    let mut tail = false;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Greedy(_) if i != segments.len() - 1 => return Err(InsertError::InvalidGreedy),
            Segment::Literal(_) | Segment::Named(_) if tail => return Err(InsertError::InvalidOptional),
            Segment::OptionalNamed(_) | Segment::Greedy(_) => tail = true,
            _ => {}
        }

        if let Some(name) = segment.param() {
            if segments[..i].iter().filter_map(Segment::param).any(|n| n == name) {
                return Err(InsertError::DuplicateParam { name: name.to_owned() });
            }
        }
    }

    Ok(())
}
