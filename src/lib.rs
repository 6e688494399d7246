//! Fault-injection HTTP responder built on `tower`
//!
//! This crate provides a stand-in backend that answers every request with a
//! fixed body, after a delay and with a failure rate chosen by the caller
//! through request headers.
//!
//! ## Headers
//!
//! For a responder named `svc`:
//!
//! * `x-svc-delay` - mean delay in milliseconds. The actual delay is sampled
//!   from a normal distribution around it.
//! * `x-svc-error` - probability, between 0 and 1, of answering with a
//!   `500 Internal Server Error`.
//!
//! A responder named `unknown` ignores these headers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tower_fault_responder::{app, identity::ServiceIdentity};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = ServiceIdentity::new("svc", "FFFAC3")?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!
//! axum::serve(listener, app(identity)).await?;
//! # Ok(())
//! # }
//! ```

use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;

pub mod config;
pub mod decider;
pub mod error;
pub mod fault;
pub mod identity;
pub mod latency;
pub mod params;
pub mod response;

pub use error::Error;
use fault::FaultLayer;
use identity::ServiceIdentity;
use response::Responder;

/// Build the router answering every path and method for `identity`.
pub fn app(identity: ServiceIdentity) -> Router {
    let identity = Arc::new(identity);

    let service = ServiceBuilder::new()
        .layer(FaultLayer::new(identity.clone()))
        .service(Responder::new(identity.body().clone()));

    Router::new().fallback_service(service)
}

#[cfg(test)]
mod test_utils;
