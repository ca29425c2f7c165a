//! error types of route registration and request dispatch.

use core::fmt;

use std::error;

use flash_router::InsertError;
use http::{Method, StatusCode};

/// error produced when a route can not be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterError {
    pub method: Method,
    /// full pattern including the prefix of enclosing scopes.
    pub pattern: String,
    pub source: InsertError,
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to register {} {}: {}", self.method, self.pattern, self.source)
    }
}

impl error::Error for RegisterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}

/// error produced when a matched request can not be handed to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DispatchError {
    /// no route matches the request.
    NotFound,
    /// the resolved action is not present in the controller's action table.
    ActionNotFound { action: String },
}

impl DispatchError {
    /// http status code the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ActionNotFound { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::ActionNotFound { action } => write!(f, "action {action} not found"),
        }
    }
}

impl error::Error for DispatchError {}
