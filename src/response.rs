//! # Response writer
//!
//! [`Responder`] is the innermost service. It turns the [`ResponseDecision`]
//! stored in the request extensions into exactly one response:
//!
//! * `200 OK` with the configured body and its `Content-Length`.
//! * `500 Internal Server Error` with an empty body and `Content-Length: 0`.
//!
//! Both carry `Access-Control-Allow-Origin: *`, and echo the
//! `Access-Control-Request-Headers` of the request as
//! `Access-Control-Allow-Headers` when present.

use crate::params::ResponseDecision;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Request, Response, StatusCode},
};
use std::{
    convert::Infallible,
    future::{ready, Ready},
    task::{Context, Poll},
};
use tower::Service;

/// Service writing the final response for a request.
#[derive(Debug, Clone)]
pub struct Responder {
    body: Bytes,
}

impl Responder {
    /// Create a new `Responder` answering with `body` on success.
    pub fn new(body: Bytes) -> Self {
        Responder { body }
    }

    fn respond(
        &self,
        decision: ResponseDecision,
        allow_headers: Option<HeaderValue>,
    ) -> Response<Body> {
        let (status, body) = if decision.should_fail {
            (StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        } else {
            (StatusCode::OK, self.body.clone())
        };

        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        if let Some(allow_headers) = allow_headers {
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
        }

        *response.body_mut() = Body::from(body);
        response
    }
}

impl<B> Service<Request<B>> for Responder {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let decision = request
            .extensions()
            .get::<ResponseDecision>()
            .copied()
            .unwrap_or_default();
        let allow_headers = request
            .headers()
            .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
            .cloned();

        ready(Ok(self.respond(decision, allow_headers)))
    }
}
