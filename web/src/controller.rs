//! convention based controller resources.
//!
//! A resource registered with [Router::resource](crate::Router::resource) answers `GET`, `POST`,
//! `PUT`, `PATCH` and `DELETE` on its prefix followed by optional `id` and `action` segments. The
//! action name resolved from the request is looked up in the controller's [ActionTable].
//!
//! [Router::controller](crate::Router::controller) instead registers one explicit route per named
//! action. Extra actions there carry the method token as suffix (`StatGET`).
//!
//! # Examples
//! ```rust
//! use flash_web::{ActionTable, Context, Controller};
//! use http::StatusCode;
//!
//! #[derive(Default)]
//! struct Pages;
//!
//! impl Pages {
//!     fn index(&mut self, ctx: &mut Context) {
//!         ctx.render_string(StatusCode::OK, "pages");
//!     }
//!
//!     fn show(&mut self, ctx: &mut Context) {
//!         let body = format!("page {}", ctx.id());
//!         ctx.render_string(StatusCode::OK, body);
//!     }
//!
//!     // GET /pages/stat
//!     fn stat(&mut self, ctx: &mut Context) {
//!         ctx.render_string(StatusCode::OK, "stat");
//!     }
//! }
//!
//! impl Controller for Pages {
//!     fn actions(table: ActionTable<Self>) -> ActionTable<Self> {
//!         table.index(Self::index).show(Self::show).action("GETStat", Self::stat)
//!     }
//! }
//! ```

use std::collections::HashMap;

use http::Method;

use super::context::Context;

/// http methods a resource is registered on. action names starting with one of them are extra
/// actions reachable through the `id` segment.
pub(crate) const RESOURCE_METHODS: [Method; 5] = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

/// function pointer of a controller action.
pub type Action<C> = fn(&mut C, &mut Context);

/// a controller type. a fresh value is constructed with [Default] for every request it serves.
pub trait Controller: Default + Send + 'static {
    /// register actions of controller. called once when the resource is registered.
    fn actions(table: ActionTable<Self>) -> ActionTable<Self>;
}

/// mapping from action name to controller action.
pub struct ActionTable<C> {
    actions: HashMap<String, Action<C>>,
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ActionTable<C> {
    pub fn new() -> Self {
        Self { actions: HashMap::new() }
    }

    /// register an action under given name. an existing action of the same name is replaced.
    pub fn action(mut self, name: impl Into<String>, action: Action<C>) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    /// `GET` without id.
    pub fn index(self, action: Action<C>) -> Self {
        self.action("Index", action)
    }

    /// `POST` without id.
    pub fn create(self, action: Action<C>) -> Self {
        self.action("Create", action)
    }

    /// `GET` with id.
    pub fn show(self, action: Action<C>) -> Self {
        self.action("Show", action)
    }

    /// `POST` or `PUT` with id.
    pub fn update(self, action: Action<C>) -> Self {
        self.action("Update", action)
    }

    /// `DELETE` with id.
    pub fn destroy(self, action: Action<C>) -> Self {
        self.action("Destroy", action)
    }

    pub fn get(&self, name: &str) -> Option<Action<C>> {
        self.actions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// sorted action names made of an http method token followed by a non empty name.
    pub fn extras(&self) -> Vec<String> {
        let mut extras = self
            .names()
            .filter(|name| {
                RESOURCE_METHODS
                    .iter()
                    .any(|m| name.len() > m.as_str().len() && name.starts_with(m.as_str()))
            })
            .map(str::to_owned)
            .collect::<Vec<_>>();
        extras.sort_unstable();
        extras
    }

    /// explicit routes relative to a controller prefix, ordered by action name. names without a
    /// route convention are skipped.
    pub(crate) fn routes(&self) -> Vec<(Method, String, &str, Action<C>)> {
        let mut actions = self.actions.iter().map(|(name, action)| (name.as_str(), *action)).collect::<Vec<_>>();
        actions.sort_unstable_by_key(|(name, _)| *name);

        let mut routes = Vec::new();

        for (name, action) in actions {
            match name {
                "Index" => routes.push((Method::GET, String::new(), name, action)),
                "Create" => routes.push((Method::POST, String::new(), name, action)),
                "Show" => routes.push((Method::GET, String::from("/:id"), name, action)),
                "Update" => routes.push((Method::PUT, String::from("/:id"), name, action)),
                "Destroy" | "Delete" => routes.push((Method::DELETE, String::from("/:id"), name, action)),
                _ => {
                    for method in RESOURCE_METHODS {
                        let Some(segment) = name.strip_suffix(method.as_str()).filter(|s| !s.is_empty()) else {
                            continue;
                        };
                        let segment = segment.to_lowercase();
                        routes.push((method.clone(), format!("/{segment}"), name, action));
                        routes.push((method, format!("/:id/{segment}"), name, action));
                    }
                }
            }
        }

        routes
    }
}
