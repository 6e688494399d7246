//! Utilities for testing this crate

use crate::identity::ServiceIdentity;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
};

pub const SVC_COLOR: &str = "00AAFF";

pub fn svc_identity() -> ServiceIdentity {
    ServiceIdentity::new("svc", SVC_COLOR).unwrap()
}

pub fn header_map(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    headers
}

pub fn request(pairs: &[(&'static str, &str)]) -> Request<Body> {
    let mut request = Request::builder().uri("/api/cell").body(Body::empty()).unwrap();
    *request.headers_mut() = header_map(pairs);
    request
}
