//! request context type handed to gates, handlers and controller actions.

use core::any::Any;

use std::collections::HashMap;

use bytes::Bytes;
use cookie::Cookie;
use http::{
    HeaderValue, Method, Request, Response, StatusCode,
    header::{self, AsHeaderName, COOKIE},
};

/// per request state with side effect based rendering.
///
/// A context is taken from a pool for every matched request and cleared once the request is
/// served. Nothing set on it outlives the request it was set for.
///
/// # Examples
/// ```rust
/// # use flash_web::Context;
/// # use http::StatusCode;
/// fn handler(ctx: &mut Context) {
///     let id = ctx.param_i64("id").unwrap_or_default();
///     ctx.render_string(StatusCode::OK, format!("page {id}"));
/// }
/// ```
pub struct Context {
    req: Request<Bytes>,
    params: Vec<(String, String)>,
    action: String,
    vars: HashMap<String, Box<dyn Any + Send + Sync>>,
    res: Option<Response<Bytes>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            req: Request::default(),
            params: Vec::new(),
            action: String::new(),
            vars: HashMap::new(),
            res: None,
        }
    }

    // params borrow from request path so they are copied before request is moved in.
    pub(crate) fn set_params<'a, I>(&mut self, params: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
    }

    pub(crate) fn set_request(&mut self, req: Request<Bytes>) {
        self.req = req;
    }

    pub(crate) fn set_action(&mut self, action: &str) {
        self.action.clear();
        self.action.push_str(action);
    }

    /// drop every piece of request state while keeping allocated capacity.
    pub fn clear(&mut self) {
        self.req = Request::default();
        self.params.clear();
        self.action.clear();
        self.vars.clear();
        self.res = None;
    }

    /// method of request.
    #[inline]
    pub fn method(&self) -> &Method {
        self.req.method()
    }

    /// path of request uri without query.
    #[inline]
    pub fn path(&self) -> &str {
        self.req.uri().path()
    }

    #[inline]
    pub fn request(&self) -> &Request<Bytes> {
        &self.req
    }

    #[inline]
    pub fn request_mut(&mut self) -> &mut Request<Bytes> {
        &mut self.req
    }

    /// body of request.
    #[inline]
    pub fn body(&self) -> &Bytes {
        self.req.body()
    }

    /// value of request header with given name. header value with non visible ascii is treated
    /// as absent.
    pub fn header<K>(&self, name: K) -> Option<&str>
    where
        K: AsHeaderName,
    {
        self.req.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// percent decoded value of request cookie with given name.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.req
            .headers()
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|v| Cookie::parse_encoded(v.trim()).ok())
            .find(|c| c.name() == name)
            .map(|c| c.value().to_owned())
    }

    /// first value of query string parameter with given name.
    pub fn query(&self, name: &str) -> Option<String> {
        let query = self.req.uri().query()?;
        serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .ok()?
            .into_iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }

    /// value of route parameter. unknown and unbound parameters read as empty string.
    pub fn param(&self, name: &str) -> &str {
        self.params
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v.as_str()))
            .unwrap_or_default()
    }

    pub fn param_i64(&self, name: &str) -> Option<i64> {
        self.param(name).parse().ok()
    }

    pub fn param_int(&self, name: &str) -> Option<isize> {
        self.param(name).parse().ok()
    }

    /// true when route parameter is `1` or `true`.
    pub fn param_bool(&self, name: &str) -> bool {
        matches!(self.param(name), "1" | "true")
    }

    /// shortcut for `param("id")`.
    #[inline]
    pub fn id(&self) -> &str {
        self.param("id")
    }

    #[inline]
    pub fn id_i64(&self) -> Option<i64> {
        self.param_i64("id")
    }

    /// every route parameter in declaration order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// name of resolved controller action. empty for plain handlers.
    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// store a request scoped variable. an existing variable of the same key is replaced.
    pub fn set_var<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.vars.insert(key.into(), Box::new(value));
    }

    /// request scoped variable with given key. None when absent or of a different type.
    pub fn var<T>(&self, key: &str) -> Option<&T>
    where
        T: 'static,
    {
        self.vars.get(key).and_then(|v| v.downcast_ref())
    }

    /// render response with given status and body. replaces earlier rendered response.
    pub fn render(&mut self, status: StatusCode, body: impl Into<Bytes>) {
        let mut res = Response::new(body.into());
        *res.status_mut() = status;
        self.res = Some(res);
    }

    pub fn render_string(&mut self, status: StatusCode, text: impl Into<String>) {
        self.render(status, text.into());
        self.insert_header(header::CONTENT_TYPE, TEXT_UTF8);
    }

    /// render plain text error response with message followed by a new line.
    pub fn render_error(&mut self, status: StatusCode, msg: &str) {
        self.res = Some(error_response(status, msg));
    }

    /// mutable access to rendered response.
    pub fn response_mut(&mut self) -> Option<&mut Response<Bytes>> {
        self.res.as_mut()
    }

    /// take rendered response. a context rendering nothing produce `200 OK` with empty body.
    pub fn take_response(&mut self) -> Response<Bytes> {
        self.res.take().unwrap_or_default()
    }

    fn insert_header(&mut self, name: header::HeaderName, value: HeaderValue) {
        if let Some(res) = self.res.as_mut() {
            res.headers_mut().insert(name, value);
        }
    }
}

const TEXT_UTF8: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");

pub(crate) fn error_response(status: StatusCode, msg: &str) -> Response<Bytes> {
    let mut body = String::with_capacity(msg.len() + 1);
    body.push_str(msg);
    body.push('\n');

    let mut res = Response::new(Bytes::from(body));
    *res.status_mut() = status;
    let headers = res.headers_mut();
    headers.insert(header::CONTENT_TYPE, TEXT_UTF8);
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res
}
