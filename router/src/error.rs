use core::fmt;

use std::error;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Attempted to insert a route whose parameter names conflict with an existing route
    /// terminating at the same position.
    Conflict {
        /// The existing route that the insertion is conflicting with.
        with: String,
    },
    /// Greedy parameters are only allowed at the end of a route.
    InvalidGreedy,
    /// Required segments can not follow an optional or greedy segment.
    InvalidOptional,
    /// Parameters must be registered with a name.
    UnnamedParam,
    /// The same parameter name is used more than once in a route.
    DuplicateParam {
        /// The repeated parameter name.
        name: String,
    },
    /// Route is not the root but contains no segment.
    Empty,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { with } => {
                write!(
                    f,
                    "insertion failed due to conflict with previously registered route: {with}",
                )
            }
            Self::InvalidGreedy => f.write_str("greedy parameters are only allowed at the end of a route"),
            Self::InvalidOptional => f.write_str("required segments can not follow an optional or greedy segment"),
            Self::UnnamedParam => f.write_str("parameters must be registered with a name"),
            Self::DuplicateParam { name } => write!(f, "parameter name {name} is used more than once"),
            Self::Empty => f.write_str("route contains no segment"),
        }
    }
}

impl error::Error for InsertError {}

/// No route matched the given method and path.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MatchError;

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("match error: route not found")
    }
}

impl error::Error for MatchError {}
