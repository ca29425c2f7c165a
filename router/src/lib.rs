//! A segment trie router with optional and greedy trailing segments.
//!
//!```rust
//!use flash_router::Router;
//!use http::Method;
//!
//!fn main() -> Result<(), Box<dyn core::error::Error>> {
//!    let mut router = Router::new();
//!    router.insert(Method::GET, "/home", "Welcome!")?;
//!    router.insert(Method::GET, "/users/:id", "A User")?;
//!
//!    let matched = router.at(&Method::GET, "/users/978")?;
//!    assert_eq!(matched.params.get("id"), Some("978"));
//!    assert_eq!(*matched.value, "A User");
//!
//!    Ok(())
//!}
//!```
//!
//!# Parameters
//!
//!Routes are split into `/` separated segments. Leading, trailing and repeated slashes carry no
//!meaning, both in routes and in matched paths.
//!
//!Named parameters like `/:id` match exactly one segment.
//!
//!```rust
//!# use flash_router::Router;
//!# use http::Method;
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.insert(Method::GET, "/users/:id", 42)?;
//!
//!let matched = router.at(&Method::GET, "/users/1/")?;
//!assert_eq!(matched.params.get("id"), Some("1"));
//!
//!assert!(router.at(&Method::GET, "/users").is_err());
//!assert!(router.at(&Method::GET, "/users/1/2").is_err());
//!# Ok(())
//!# }
//!```
//!
//!Optional parameters start with a `&`. They can only appear at the end of a route and a path may
//!stop before reaching them. Unreached optional parameters read as empty strings.
//!
//!```rust
//!# use flash_router::Router;
//!# use http::Method;
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.insert(Method::GET, "/pages/&id/&action", true)?;
//!
//!let matched = router.at(&Method::GET, "/pages/1/edit")?;
//!assert_eq!(matched.params.get("id"), Some("1"));
//!assert_eq!(matched.params.get("action"), Some("edit"));
//!
//!let matched = router.at(&Method::GET, "/pages")?;
//!assert_eq!(matched.params.get("id"), Some(""));
//!# Ok(())
//!# }
//!```
//!
//!Greedy parameters start with a `@` and match every remaining segment. They must always be at the
//!*end* of the route.
//!
//!```rust
//!# use flash_router::Router;
//!# use http::Method;
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.insert(Method::GET, "/files/@rest", true)?;
//!
//!let matched = router.at(&Method::GET, "/files/static/bar.css")?;
//!assert_eq!(matched.params.get("rest"), Some("static/bar.css"));
//!
//!// the greedy tail may be empty.
//!let matched = router.at(&Method::GET, "/files")?;
//!assert_eq!(matched.params.get("rest"), Some(""));
//!# Ok(())
//!# }
//!```
//!
//!# Priority
//!
//!At every segment a static child is tried first, then the named child and finally the greedy
//!child. Matching never backtracks: once a segment took a branch the rest of the path has to match
//!below it.
//!
//!```rust
//!# use flash_router::Router;
//!# use http::Method;
//!# fn main() -> Result<(), Box<dyn core::error::Error>> {
//!let mut router = Router::new();
//!router.insert(Method::GET, "/a/b", "static")?;
//!router.insert(Method::GET, "/a/:id", "named")?;
//!router.insert(Method::GET, "/a/@rest", "greedy")?;
//!
//!assert_eq!(*router.at(&Method::GET, "/a/b")?.value, "static");
//!assert_eq!(*router.at(&Method::GET, "/a/c")?.value, "named");
//!# Ok(())
//!# }
//!```
//!
//!# Conflict Rules
//!
//!Inserting the same route twice replaces the earlier value. Inserting a route that ends on the same
//!trie position as an existing one but binds different parameter names there is rejected:
//!
//!```rust
//!# use flash_router::{InsertError, Router};
//!# use http::Method;
//!let mut router = Router::new();
//!router.insert(Method::GET, "/users/:id", 1).unwrap();
//!router.insert(Method::GET, "/users/:id", 2).unwrap();
//!assert_eq!(
//!    router.insert(Method::GET, "/users/:name", 3),
//!    Err(InsertError::Conflict { with: "/users/:id".into() })
//!);
//!assert_eq!(*router.at(&Method::GET, "/users/1").unwrap().value, 2);
//!```

#![forbid(unsafe_code)]

mod error;
mod router;
mod tree;

pub mod action;
pub mod params;
pub mod pattern;

pub use error::{InsertError, MatchError};
pub use params::Params;
pub use router::{Match, Router};

use xitca_unsafe_collection::small_str::SmallBoxedStr as SmallStr;
