use std::{convert::Infallible, iter, sync::Arc};

use http::Method;
use tracing::debug;
use xitca_service::Service;

use super::{
    config::Config,
    context::Context,
    controller::{ActionTable, Controller, RESOURCE_METHODS},
    dispatch::{ControllerResource, Endpoint, Gate, Resource, Target, controller_action},
    error::RegisterError,
    service::RouterService,
};

/// optional parameters appended to every resource prefix.
const RESOURCE_PARAMS: &[&str] = &["id", "action"];

/// registration time builder of routes. [Router::seal] turns it into an immutable
/// [RouterService] serving requests.
///
/// # Examples
/// ```rust
/// # use flash_web::{Context, Router, Scope, gate};
/// # use http::StatusCode;
/// # fn main() -> Result<(), flash_web::RegisterError> {
/// let mut router = Router::new();
///
/// router
///     .get("/", |ctx: &mut Context| ctx.render_string(StatusCode::OK, "hello,world!"))?
///     .get("/users/:id", |ctx: &mut Context| {
///         let body = format!("user {}", ctx.param("id"));
///         ctx.render_string(StatusCode::OK, body)
///     })?;
///
/// let admin = Scope::new("/admin").gate(|ctx: &mut Context| ctx.header("x-admin").is_some());
/// router.scope(admin, |router| {
///     router.get("/stats", |_: &mut Context| {})?;
///     Ok(())
/// })?;
///
/// let service = router.seal();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Router {
    routes: flash_router::Router<Endpoint>,
    config: Config,
    // prefix of enclosing scopes without trailing slash.
    prefix: String,
    // gates of enclosing scopes.
    gates: Vec<Gate>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            routes: flash_router::Router::new(),
            config,
            prefix: String::new(),
            gates: Vec::new(),
        }
    }

    /// register handler for given method and pattern.
    pub fn route<F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route_gated(method, pattern, handler, iter::empty())
    }

    /// register handler guarded by gates. gates run in order after the gates of enclosing scopes.
    pub fn route_gated<F, G>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: F,
        gates: G,
    ) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
        G: IntoIterator<Item = Gate>,
    {
        let gates = self.gates.iter().cloned().chain(gates).collect();
        let endpoint = Endpoint::new(gates, Target::Handler(Arc::new(handler)));
        self.insert(method, pattern, &[], endpoint)?;
        Ok(self)
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.route(Method::DELETE, pattern, handler)
    }

    /// register controller resource on `prefix/&id/&action` for `GET`, `POST`, `PUT`, `PATCH` and
    /// `DELETE`. action names starting with a method token (`GETStat`) become extra actions
    /// reachable as `GET prefix/stat`.
    ///
    /// Registration is all or nothing: when any method fails no route of the resource is kept.
    pub fn resource<C>(&mut self, prefix: &str) -> Result<&mut Self, RegisterError>
    where
        C: Controller,
    {
        self.insert_resource(prefix, ControllerResource::<C>::new(None))
    }

    /// same as [Router::resource] with explicitly declared extra actions.
    pub fn resource_with_extras<C>(&mut self, prefix: &str, extras: &[&str]) -> Result<&mut Self, RegisterError>
    where
        C: Controller,
    {
        let extras = extras.iter().map(|e| e.to_string()).collect();
        self.insert_resource(prefix, ControllerResource::<C>::new(Some(extras)))
    }

    /// register every action of controller on an explicit route below `prefix`.
    ///
    /// - `Index` on `GET prefix` and `Create` on `POST prefix`.
    /// - `Show` on `GET prefix/:id`, `Update` on `PUT prefix/:id`, `Destroy` or `Delete` on
    ///   `DELETE prefix/:id`.
    /// - names ending with a method token (`StatGET`) on `prefix/stat` and `prefix/:id/stat` for
    ///   that method.
    ///
    /// Other names are not routed. Registration is all or nothing.
    pub fn controller<C>(&mut self, prefix: &str) -> Result<&mut Self, RegisterError>
    where
        C: Controller,
    {
        let table = C::actions(ActionTable::new());
        let prefix = prefix.trim_end_matches('/');
        let snapshot = self.routes.clone();

        for (method, path, name, action) in table.routes() {
            let target = Target::Action {
                name: Arc::from(name),
                handler: controller_action::<C>(action),
            };
            let endpoint = Endpoint::new(self.gates.clone(), target);
            if let Err(e) = self.insert(method, &format!("{prefix}{path}"), &[], endpoint) {
                self.routes = snapshot;
                return Err(e);
            }
        }

        Ok(self)
    }

    /// register `GET` handler for every path below `prefix`. remaining path is bound to `path`
    /// parameter and can be empty.
    pub fn handle_prefix<F>(&mut self, prefix: &str, handler: F) -> Result<&mut Self, RegisterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        let pattern = format!("{}/@path", prefix.trim_end_matches('/'));
        self.get(&pattern, handler)
    }

    /// register routes with prefix and gates of given [Scope]. scopes can be nested.
    pub fn scope<S, F>(&mut self, scope: S, f: F) -> Result<&mut Self, RegisterError>
    where
        S: Into<Scope>,
        F: FnOnce(&mut Self) -> Result<(), RegisterError>,
    {
        let Scope { prefix, gates } = scope.into();

        let prefix_len = self.prefix.len();
        let gates_len = self.gates.len();

        let prefix = prefix.trim_matches('/');
        if !prefix.is_empty() {
            self.prefix.push('/');
            self.prefix.push_str(prefix);
        }
        self.gates.extend(gates);

        let res = f(self);

        self.prefix.truncate(prefix_len);
        self.gates.truncate(gates_len);

        res.map(|_| self)
    }

    /// finish registration.
    pub fn seal(self) -> RouterService {
        RouterService::new(self.routes, self.config)
    }

    fn insert_resource<R>(&mut self, prefix: &str, resource: R) -> Result<&mut Self, RegisterError>
    where
        R: Resource + 'static,
    {
        let resource = Arc::new(resource) as Arc<dyn Resource>;
        let snapshot = self.routes.clone();

        for method in RESOURCE_METHODS {
            let endpoint = Endpoint::new(self.gates.clone(), Target::Resource(resource.clone()));
            if let Err(e) = self.insert(method, prefix, RESOURCE_PARAMS, endpoint) {
                self.routes = snapshot;
                return Err(e);
            }
        }

        Ok(self)
    }

    fn insert(&mut self, method: Method, pattern: &str, extras: &[&str], endpoint: Endpoint) -> Result<(), RegisterError> {
        let pattern = self.full_pattern(pattern);

        match self.routes.insert_with_extras(method.clone(), &pattern, extras, endpoint) {
            Ok(_) => {
                debug!("registered route {} {}", method, pattern);
                Ok(())
            }
            Err(source) => Err(RegisterError {
                method,
                pattern,
                source,
            }),
        }
    }

    fn full_pattern(&self, pattern: &str) -> String {
        let pattern = pattern.trim_start_matches('/');

        let mut full = String::with_capacity(self.prefix.len() + pattern.len() + 1);
        full.push_str(&self.prefix);
        if full.is_empty() || !pattern.is_empty() {
            full.push('/');
        }
        full.push_str(pattern);
        full
    }
}

/// build sealed [RouterService] from a clone of router.
impl Service for Router {
    type Response = RouterService;
    type Error = Infallible;

    async fn call(&self, _: ()) -> Result<Self::Response, Self::Error> {
        Ok(self.clone().seal())
    }
}

/// registration time group of routes sharing a path prefix and gates.
pub struct Scope {
    prefix: String,
    gates: Vec<Gate>,
}

impl Scope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            gates: Vec::new(),
        }
    }

    /// append a gate running before every route of the scope.
    pub fn gate<F>(self, f: F) -> Self
    where
        F: Fn(&mut Context) -> bool + Send + Sync + 'static,
    {
        self.with_gate(Arc::new(f))
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }
}

impl From<&str> for Scope {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}

impl From<String> for Scope {
    fn from(prefix: String) -> Self {
        Self::new(prefix)
    }
}
