//! configuration for [Router](crate::Router) and the sealed [RouterService](crate::RouterService).

/// builder style configuration of request serving.
///
/// # Examples
/// ```rust
/// # use flash_web::{Config, Router};
/// let router = Router::with_config(Config::new().redirect_clean_path(false).pool_capacity(16));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) redirect_clean_path: bool,
    pub(crate) pool_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            redirect_clean_path: true,
            pool_capacity: 128,
        }
    }

    /// answer requests with non canonical path (`/a/../b`, `//a`) with a `301 Moved Permanently`
    /// pointing to the cleaned path.
    ///
    /// Default to true.
    pub const fn redirect_clean_path(mut self, value: bool) -> Self {
        self.redirect_clean_path = value;
        self
    }

    /// maximum number of idle request contexts kept for reuse.
    ///
    /// Default to 128.
    pub const fn pool_capacity(mut self, value: usize) -> Self {
        self.pool_capacity = value;
        self
    }
}
