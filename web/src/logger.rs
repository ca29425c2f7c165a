use std::{fmt, time::Instant};

use bytes::Bytes;
use http::{Request, Response};
use tracing::{Instrument, Level, error, info, info_span, warn};
use xitca_service::{Service, ready::ReadyService};

/// builder for tracing log middleware.
///
/// # Examples
/// ```rust
/// # use flash_web::{Context, Router, logger::Logger, dev::ServiceExt};
/// let mut router = Router::new();
/// router.get("/", |_: &mut Context| {}).unwrap();
///
/// // log every request with method, path, status and elapsed time.
/// let builder = router.enclosed(Logger::new());
/// ```
pub struct Logger {
    _priv: (),
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// construct a new logger middleware builder with [`Level::INFO`] of verbosity it generate and captures.
    /// would try to initialize global trace dispatcher.
    pub fn new() -> Self {
        Self::with_level(Level::INFO)
    }

    /// construct a new logger middleware builder with given [Level] of verbosity it generate and captures.
    /// would try to initialize global trace dispatcher.
    pub fn with_level(level: Level) -> Self {
        if let Err(e) = tracing_subscriber::fmt().with_max_level(level).try_init() {
            // the most likely case is trace dispatcher has already been set by user. log the warning and move on.
            warn!("failed to initialize global trace dispatcher: {}", e);
        }

        Self { _priv: () }
    }
}

impl<S, E> Service<Result<S, E>> for Logger {
    type Response = LoggerService<S>;
    type Error = E;

    async fn call(&self, res: Result<S, E>) -> Result<Self::Response, Self::Error> {
        res.map(|service| LoggerService { service })
    }
}

/// service running every request in an info level span carrying its method and path.
pub struct LoggerService<S> {
    service: S,
}

impl<S> Service<Request<Bytes>> for LoggerService<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>>,
    S::Error: fmt::Debug,
{
    type Response = S::Response;
    type Error = S::Error;

    async fn call(&self, req: Request<Bytes>) -> Result<Self::Response, Self::Error> {
        let span = info_span!("request", method = %req.method(), path = req.uri().path());

        async {
            let start = Instant::now();
            let res = self.service.call(req).await;
            match res {
                Ok(ref res) => info!("{} in {:?}", res.status(), start.elapsed()),
                Err(ref e) => error!("{:?}", e),
            }
            res
        }
        .instrument(span)
        .await
    }
}

impl<S> ReadyService for LoggerService<S>
where
    S: ReadyService,
{
    type Ready = S::Ready;

    #[inline]
    async fn ready(&self) -> Self::Ready {
        self.service.ready().await
    }
}

#[cfg(test)]
mod test {
    use http::StatusCode;
    use xitca_service::ServiceExt;
    use xitca_unsafe_collection::futures::NowOrPanic;

    use crate::{Context, Router};

    use super::*;

    #[test]
    fn enclosed() {
        let mut router = Router::new();
        router
            .get("/", |ctx: &mut Context| ctx.render_string(StatusCode::OK, "hello"))
            .unwrap();

        let service = router
            .enclosed(Logger::with_level(Level::TRACE))
            .call(())
            .now_or_panic()
            .unwrap();

        let res = service
            .call(Request::get("/").body(Bytes::new()).unwrap())
            .now_or_panic()
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"hello");

        let res = service
            .call(Request::get("/missing").body(Bytes::new()).unwrap())
            .now_or_panic()
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn init_twice() {
        // second initialization only warns.
        let _ = Logger::new();
        let _ = Logger::default();
    }
}
