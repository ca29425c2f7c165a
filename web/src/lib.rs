//! convention based http router.
//!
//! Routes are registered on a [Router] either as plain handlers or as controller resources and
//! served by the sealed [RouterService].
//!
//! # Examples
//! ```rust
//! use flash_web::{ActionTable, Context, Controller, Router};
//! use http::{Request, StatusCode};
//!
//! #[derive(Default)]
//! struct Pages;
//!
//! impl Pages {
//!     fn show(&mut self, ctx: &mut Context) {
//!         let body = format!("page {}", ctx.id());
//!         ctx.render_string(StatusCode::OK, body);
//!     }
//! }
//!
//! impl Controller for Pages {
//!     fn actions(table: ActionTable<Self>) -> ActionTable<Self> {
//!         table.show(Self::show)
//!     }
//! }
//!
//! # fn main() -> Result<(), flash_web::RegisterError> {
//! let mut router = Router::new();
//! router
//!     .get("/", |ctx: &mut Context| ctx.render_string(StatusCode::OK, "hello,world!"))?
//!     .resource::<Pages>("/api/pages")?;
//!
//! let service = router.seal();
//!
//! let res = service.serve(Request::get("/api/pages/42").body(Default::default()).unwrap());
//! assert_eq!(res.body().as_ref(), b"page 42");
//!
//! // DELETE resolves to Destroy action which Pages does not provide.
//! let res = service.serve(Request::delete("/api/pages/42").body(Default::default()).unwrap());
//! assert_eq!(res.status(), StatusCode::BAD_REQUEST);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod context;
mod dispatch;
mod error;
mod pool;
mod router;
mod service;

pub mod controller;

#[cfg(feature = "logger")]
pub mod logger;

pub mod dev {
    pub use bytes;
    pub use xitca_service::{Service, ServiceExt, ready::ReadyService};
}

pub use config::Config;
pub use context::Context;
pub use controller::{Action, ActionTable, Controller};
pub use dispatch::{Gate, gate};
pub use error::{DispatchError, RegisterError};
pub use router::{Router, Scope};
pub use service::{RouterService, clean_path};

pub use flash_router::{InsertError, action};
pub use http;
