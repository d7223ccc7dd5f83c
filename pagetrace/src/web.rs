use std::{any::Any, error::Error as StdError, panic::AssertUnwindSafe, sync::Arc};

use axum::{
    extract::{Extension, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use futures::FutureExt;
use parking_lot::Mutex;
use tower::ServiceBuilder;
use tracing::{field, Instrument};

use crate::{
    cycle::{RequestCycle, RequestCycleFactory},
    session::Session,
    target::RequestTarget,
};

/// Extension trait mounting a [`RequestCycle`] on every request of a router.
///
/// Handlers find a [`CycleHandle`] and the agent (`Arc<dyn Agent>`) in the
/// request extensions. A [`Session`] inserted by an outer layer is forwarded
/// to the agent when the request begins.
///
/// ```ignore
/// let app = Router::new()
///     .route("/", get(home))
///     .with_pagetrace(config.request_cycle_factory(agent));
/// ```
pub trait PagetraceRouter {
    fn with_pagetrace(self, factory: RequestCycleFactory) -> Self;
}

impl<S> PagetraceRouter for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_pagetrace(self, factory: RequestCycleFactory) -> Self {
        let layer = ServiceBuilder::new()
            .layer(Extension(Arc::clone(factory.agent())))
            .layer(middleware::from_fn_with_state(factory, request_cycle));
        self.layer(layer)
    }
}

/// Handle on the [`RequestCycle`] of the current request.
#[derive(Clone)]
pub struct CycleHandle(Arc<Mutex<RequestCycle>>);

impl CycleHandle {
    fn new(cycle: RequestCycle) -> Self {
        Self(Arc::new(Mutex::new(cycle)))
    }

    /// Reports the target the request was dispatched to. Only the first
    /// target of a request names its transaction.
    pub fn set_target(&self, target: RequestTarget) {
        self.0.lock().on_request_target_set(&target);
    }
}

/// An uncaught error of a request handler.
///
/// Renders as a bare `500 Internal Server Error`; the request cycle
/// middleware notices the error with the agent. A panicking handler is
/// turned into one of these.
#[derive(Debug, Clone)]
pub struct RuntimeException(Arc<anyhow::Error>);

impl RuntimeException {
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }
}

impl<E> From<E> for RuntimeException
where
    E: Into<anyhow::Error>,
{
    fn from(error: E) -> Self {
        Self(Arc::new(error.into()))
    }
}

impl IntoResponse for RuntimeException {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

async fn request_cycle(
    State(factory): State<RequestCycleFactory>,
    mut request: Request,
    next: Next,
) -> Response {
    let span = tracing::info_span!(
        target: "pagetrace",
        "transaction",
        method = %request.method(),
        uri = %request.uri(),
        user.name = field::Empty,
        account.name = field::Empty,
        transaction.name = field::Empty,
        transaction.category = field::Empty,
        transaction.ignored = field::Empty,
    );

    async move {
        let mut cycle = factory.new_request_cycle();
        cycle.on_begin_request(request.extensions().get::<Session>());
        let handle = CycleHandle::new(cycle);
        request.extensions_mut().insert(handle.clone());

        let mut response = AssertUnwindSafe(next.run(request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                let message = panic_message(&*payload);
                RuntimeException::from(anyhow::anyhow!("handler panicked: {message}"))
                    .into_response()
            });

        let mut cycle = handle.0.lock();
        if let Some(exception) = response.extensions_mut().remove::<RuntimeException>() {
            let error: &(dyn StdError + 'static) = &**exception.error();
            if let Some(page) = cycle.on_runtime_exception(error) {
                return page;
            }
        } else if cycle.is_awaiting_target() {
            // Nothing dispatched to a page, listener or component.
            cycle.on_request_target_set(&RequestTarget::Other);
        }
        response
    }
    .instrument(span)
    .await
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "Box<dyn Any>"
    }
}
