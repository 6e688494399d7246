//! # Fault injection for `tower`
//!
//! [`FaultLayer`] reads the fault headers of every request, decides how long
//! to wait and whether to fail, and defers the inner service until then.
//!
//! Waiting is a `tokio` timer, so the task handling the request is suspended
//! and other requests keep being served. Without a delay the inner service
//! still runs on a later scheduling turn. Dropping the future before the
//! delay elapses, as happens when the client goes away, cancels the response.
//!
//! ## Usage
//!
//! ```rust
//! use tower_fault_responder::{fault::FaultLayer, identity::ServiceIdentity, response::Responder};
//! use tower::ServiceBuilder;
//! use std::sync::Arc;
//!
//! let identity = Arc::new(ServiceIdentity::new("svc", "FFFAC3").unwrap());
//!
//! let service = ServiceBuilder::new()
//!     .layer(FaultLayer::new(identity.clone()))
//!     .service(Responder::new(identity.body().clone()));
//! ```

use crate::{identity::ServiceIdentity, params::RequestParameters};
use axum::http::Request;
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::{task, time};
use tower::{Layer, Service};

/// A layer that delays and fails requests based on their headers.
#[derive(Debug, Clone)]
pub struct FaultLayer {
    identity: Arc<ServiceIdentity>,
}

impl FaultLayer {
    /// Create a new `FaultLayer` honoring the headers of `identity`.
    pub fn new(identity: Arc<ServiceIdentity>) -> Self {
        FaultLayer { identity }
    }
}

impl<S> Layer<S> for FaultLayer {
    type Service = FaultService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FaultService {
            inner,
            identity: self.identity.clone(),
        }
    }
}

/// Underlying service for the `FaultLayer`
///
/// The [`ResponseDecision`](crate::params::ResponseDecision) is inserted in
/// the request extensions before calling the inner service.
#[derive(Debug, Clone)]
pub struct FaultService<S> {
    inner: S,
    identity: Arc<ServiceIdentity>,
}

impl<B, S> Service<Request<B>> for FaultService<S>
where
    B: Send + 'static,
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = FaultFuture<S::Response, S::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let params = RequestParameters::from_headers(&self.identity, request.headers());
        let decision = params.decide(&mut rand::thread_rng());

        tracing::info!("request: {}{}", request.uri(), decision);
        request.extensions_mut().insert(decision);

        // The ready service is taken, its clone stays behind for the next call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            if decision.delay.is_zero() {
                task::yield_now().await;
            } else {
                time::sleep(decision.delay).await;
            }
            inner.call(request).await
        })
    }
}

type FaultFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;
