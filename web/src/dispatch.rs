//! gate chains and dispatch of matched requests to handlers and controller actions.

use std::sync::Arc;

use flash_router::action;

use super::{
    context::Context,
    controller::{Action, ActionTable, Controller},
    error::DispatchError,
};

/// request gate. returning false stops the request before it reaches its handler. a gate
/// stopping a request is expected to render the response it wants to return.
pub type Gate = Arc<dyn Fn(&mut Context) -> bool + Send + Sync>;

/// construct a [Gate] from closure.
///
/// # Examples
/// ```rust
/// # use flash_web::{gate, Context};
/// # use http::StatusCode;
/// let auth = gate(|ctx: &mut Context| {
///     if ctx.header("authorization").is_some() {
///         return true;
///     }
///     ctx.render_error(StatusCode::UNAUTHORIZED, "unauthorized");
///     false
/// });
/// ```
pub fn gate<F>(f: F) -> Gate
where
    F: Fn(&mut Context) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) type Handler = Arc<dyn Fn(&mut Context) + Send + Sync>;

// type erased controller resource.
pub(crate) trait Resource: Send + Sync {
    fn extras(&self) -> &[String];

    fn call(&self, ctx: &mut Context) -> Result<(), DispatchError>;
}

pub(crate) struct ControllerResource<C> {
    table: ActionTable<C>,
    extras: Box<[String]>,
}

impl<C> ControllerResource<C>
where
    C: Controller,
{
    pub(crate) fn new(extras: Option<Vec<String>>) -> Self {
        let table = C::actions(ActionTable::new());
        let extras = extras.unwrap_or_else(|| table.extras()).into_boxed_slice();
        Self { table, extras }
    }
}

impl<C> Resource for ControllerResource<C>
where
    C: Controller,
{
    fn extras(&self) -> &[String] {
        &self.extras
    }

    fn call(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        let action = self.table.get(ctx.action()).ok_or_else(|| DispatchError::ActionNotFound {
            action: ctx.action().to_owned(),
        })?;
        let mut controller = C::default();
        action(&mut controller, ctx);
        Ok(())
    }
}

// handler invoking a controller action on a fresh controller.
pub(crate) fn controller_action<C>(action: Action<C>) -> Handler
where
    C: Controller,
{
    Arc::new(move |ctx: &mut Context| action(&mut C::default(), ctx))
}

#[derive(Clone)]
pub(crate) enum Target {
    Handler(Handler),
    // controller action on an explicit route. the name is known at registration.
    Action { name: Arc<str>, handler: Handler },
    Resource(Arc<dyn Resource>),
}

/// route value stored in the trie.
#[derive(Clone)]
pub(crate) struct Endpoint {
    gates: Arc<[Gate]>,
    target: Target,
}

impl Endpoint {
    pub(crate) fn new(gates: Vec<Gate>, target: Target) -> Self {
        Self {
            gates: gates.into(),
            target,
        }
    }

    pub(crate) fn dispatch(&self, ctx: &mut Context) -> Result<(), DispatchError> {
        // action is resolved ahead of gates so they can inspect it.
        match self.target {
            Target::Resource(ref res) => {
                let action = action::resolve(ctx.method(), ctx.id(), ctx.param("action"), res.extras());
                ctx.set_action(&action);
            }
            Target::Action { ref name, .. } => ctx.set_action(name),
            Target::Handler(_) => {}
        }

        if !self.gates.iter().all(|gate| gate(ctx)) {
            return Ok(());
        }

        match self.target {
            Target::Handler(ref handler) | Target::Action { ref handler, .. } => {
                handler(ctx);
                Ok(())
            }
            Target::Resource(ref res) => res.call(ctx),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use http::{Method, Request, StatusCode};

    use super::*;

    fn context(method: Method, params: &[(&str, &str)]) -> Context {
        let mut ctx = Context::new();
        let req = Request::builder().method(method).body(Bytes::new()).unwrap();
        ctx.set_params(params.iter().copied());
        ctx.set_request(req);
        ctx
    }

    #[derive(Default)]
    struct Pages {
        calls: usize,
    }

    impl Pages {
        fn show(&mut self, ctx: &mut Context) {
            self.calls += 1;
            let body = format!("{} {}", ctx.id(), self.calls);
            ctx.render_string(StatusCode::OK, body);
        }
    }

    impl Controller for Pages {
        fn actions(table: ActionTable<Self>) -> ActionTable<Self> {
            table.show(Self::show).action("GETStat", Self::show)
        }
    }

    fn resource() -> Target {
        Target::Resource(Arc::new(ControllerResource::<Pages>::new(None)))
    }

    #[test]
    fn gate_short_circuit() {
        let called = Arc::new(AtomicUsize::new(0));
        let called2 = called.clone();

        let endpoint = Endpoint::new(
            vec![
                gate(|_| true),
                gate(|ctx| {
                    ctx.render_error(StatusCode::FORBIDDEN, "forbidden");
                    false
                }),
                gate(|_| unreachable!("gate after a failed one must not run")),
            ],
            Target::Handler(Arc::new(move |_: &mut Context| {
                called2.fetch_add(1, Ordering::Relaxed);
            })),
        );

        let mut ctx = context(Method::GET, &[]);
        assert_eq!(endpoint.dispatch(&mut ctx), Ok(()));
        assert_eq!(called.load(Ordering::Relaxed), 0);
        assert_eq!(ctx.take_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn action_visible_to_gates() {
        let endpoint = Endpoint::new(
            vec![gate(|ctx| {
                assert_eq!(ctx.action(), "GETStat");
                true
            })],
            resource(),
        );

        let mut ctx = context(Method::GET, &[("id", "stat"), ("action", "")]);
        assert_eq!(endpoint.dispatch(&mut ctx), Ok(()));
        assert_eq!(ctx.take_response().body().as_ref(), b"stat 1");
    }

    #[test]
    fn fresh_controller() {
        let endpoint = Endpoint::new(Vec::new(), resource());

        for _ in 0..2 {
            let mut ctx = context(Method::GET, &[("id", "7"), ("action", "")]);
            assert_eq!(endpoint.dispatch(&mut ctx), Ok(()));
            assert_eq!(ctx.action(), "Show");
            assert_eq!(ctx.take_response().body().as_ref(), b"7 1");
        }
    }

    #[test]
    fn action_not_found() {
        let endpoint = Endpoint::new(Vec::new(), resource());

        let mut ctx = context(Method::DELETE, &[("id", "7"), ("action", "")]);
        assert_eq!(
            endpoint.dispatch(&mut ctx),
            Err(DispatchError::ActionNotFound {
                action: "Destroy".into()
            })
        );

        let mut ctx = context(Method::PATCH, &[("id", "7"), ("action", "")]);
        assert_eq!(
            endpoint.dispatch(&mut ctx),
            Err(DispatchError::ActionNotFound {
                action: action::WRONG_ACTION.into()
            })
        );
    }

    #[test]
    fn controller_action_name() {
        let target = Target::Action {
            name: Arc::from("StatGET"),
            handler: controller_action::<Pages>(Pages::show),
        };
        let endpoint = Endpoint::new(
            vec![gate(|ctx| {
                assert_eq!(ctx.action(), "StatGET");
                true
            })],
            target,
        );

        for _ in 0..2 {
            let mut ctx = context(Method::GET, &[("id", "3")]);
            assert_eq!(endpoint.dispatch(&mut ctx), Ok(()));
            assert_eq!(ctx.take_response().body().as_ref(), b"3 1");
        }
    }

    #[test]
    fn explicit_extras() {
        let target = Target::Resource(Arc::new(ControllerResource::<Pages>::new(Some(Vec::new()))));
        let endpoint = Endpoint::new(Vec::new(), target);

        // GETStat is not declared as extra so the id segment reads as an id.
        let mut ctx = context(Method::GET, &[("id", "stat"), ("action", "")]);
        assert_eq!(endpoint.dispatch(&mut ctx), Ok(()));
        assert_eq!(ctx.action(), "Show");
    }
}
