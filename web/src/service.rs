use std::{borrow::Cow, convert::Infallible, sync::Arc};

use bytes::Bytes;
use http::{
    HeaderValue, Request, Response, StatusCode,
    header::LOCATION,
};
use tracing::{debug, trace, warn};
use xitca_service::{Service, ready::ReadyService};

use super::{
    config::Config,
    context::error_response,
    dispatch::Endpoint,
    error::DispatchError,
    pool::ContextPool,
};

/// sealed router serving requests. cheap to clone and shareable between threads.
#[derive(Clone)]
pub struct RouterService {
    inner: Arc<Inner>,
}

struct Inner {
    routes: flash_router::Router<Endpoint>,
    pool: ContextPool,
    config: Config,
}

impl RouterService {
    pub(crate) fn new(routes: flash_router::Router<Endpoint>, config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                routes,
                pool: ContextPool::new(config.pool_capacity),
                config,
            }),
        }
    }

    /// serve a request and produce its response.
    pub fn serve(&self, req: Request<Bytes>) -> Response<Bytes> {
        let Inner { routes, pool, config } = &*self.inner;

        if config.redirect_clean_path {
            if let Cow::Owned(path) = clean_path(req.uri().path()) {
                debug!("redirect {} to {}", req.uri().path(), path);
                return redirect(path, req.uri().query());
            }
        }

        let (endpoint, mut ctx) = match routes.at(req.method(), req.uri().path()) {
            Ok(matched) => {
                trace!("{} {} matched route {}", req.method(), req.uri().path(), matched.route);
                let mut ctx = pool.acquire();
                ctx.set_params(matched.params.iter());
                (matched.value, ctx)
            }
            Err(_) => {
                debug!("no route for {} {}", req.method(), req.uri().path());
                let e = DispatchError::NotFound;
                return error_response(e.status(), &e.to_string());
            }
        };

        ctx.set_request(req);

        match endpoint.dispatch(&mut ctx) {
            Ok(_) => ctx.take_response(),
            Err(e) => {
                warn!("{} {}: {}", ctx.method(), ctx.path(), e);
                error_response(e.status(), &e.to_string())
            }
        }
    }
}

impl Service<Request<Bytes>> for RouterService {
    type Response = Response<Bytes>;
    type Error = Infallible;

    #[inline]
    async fn call(&self, req: Request<Bytes>) -> Result<Self::Response, Self::Error> {
        Ok(self.serve(req))
    }
}

impl ReadyService for RouterService {
    type Ready = ();

    #[inline]
    async fn ready(&self) -> Self::Ready {}
}

fn redirect(mut location: String, query: Option<&str>) -> Response<Bytes> {
    if let Some(query) = query {
        location.push('?');
        location.push_str(query);
    }

    let mut res = Response::new(Bytes::new());
    *res.status_mut() = StatusCode::MOVED_PERMANENTLY;
    // cleaned path only contains characters of the original uri.
    if let Ok(value) = HeaderValue::try_from(location) {
        res.headers_mut().insert(LOCATION, value);
    }
    res
}

/// canonical form of a request path.
///
/// `.` and `..` elements are resolved, repeated slashes are collapsed and a leading slash is
/// added when missing. A trailing slash is kept. Returns [Cow::Borrowed] when path is already
/// canonical.
///
/// # Examples
/// ```rust
/// # use flash_web::clean_path;
/// assert_eq!(clean_path("/a/b"), "/a/b");
/// assert_eq!(clean_path("/a/../b/"), "/b/");
/// assert_eq!(clean_path("a//b/./c"), "/a/b/c");
/// assert_eq!(clean_path("/.."), "/");
/// ```
pub fn clean_path(path: &str) -> Cow<'_, str> {
    if is_clean(path) {
        return Cow::Borrowed(path);
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let mut clean = String::with_capacity(path.len() + 1);
    for segment in segments {
        clean.push('/');
        clean.push_str(segment);
    }

    if clean.is_empty() || path.ends_with('/') {
        clean.push('/');
    }

    Cow::Owned(clean)
}

fn is_clean(path: &str) -> bool {
    path.starts_with('/') && !path.contains("//") && path.split('/').all(|s| s != "." && s != "..")
}
