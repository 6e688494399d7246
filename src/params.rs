//! Per-request fault parameters and the decision derived from them.

use crate::{
    decider::{Decider, ErrorRate},
    identity::ServiceIdentity,
    latency::sample_delay,
};
use axum::http::{HeaderMap, HeaderName};
use rand::Rng;
use std::{fmt, time::Duration};

/// Fault parameters read from the request headers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequestParameters {
    /// Mean delay in milliseconds.
    pub mean_delay_ms: f64,
    /// Probability of failing the request.
    pub error_rate: f64,
}

impl RequestParameters {
    /// Read the parameters for `identity` from `headers`.
    ///
    /// Everything is 0 when the identity has no fault headers. Missing,
    /// malformed or `NaN` values are read as 0, as are infinite delays. An
    /// infinite error rate is kept.
    pub fn from_headers(identity: &ServiceIdentity, headers: &HeaderMap) -> Self {
        match identity.fault_headers() {
            Some(names) => RequestParameters {
                mean_delay_ms: number(headers, &names.delay)
                    .filter(|value| value.is_finite())
                    .unwrap_or(0.0),
                error_rate: number(headers, &names.error).unwrap_or(0.0),
            },
            None => RequestParameters::default(),
        }
    }

    /// Sample a decision for these parameters.
    pub fn decide<R: Rng + ?Sized>(&self, rng: &mut R) -> ResponseDecision {
        ResponseDecision {
            delay: sample_delay(self.mean_delay_ms, rng),
            should_fail: ErrorRate::new(self.error_rate).decide(rng),
        }
    }
}

fn number(headers: &HeaderMap, name: &HeaderName) -> Option<f64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_number)
        .filter(|value| !value.is_nan())
}

/// Decimal or `0x`-prefixed hexadecimal number, surrounding whitespace
/// ignored.
fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();

    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u64::from_str_radix(hex, 16).ok().map(|value| value as f64)
        }
        Some(_) => None,
        None => value.parse().ok(),
    }
}

/// Outcome decided for a single request.
///
/// Stored in the request extensions so that the [`Responder`] can read it.
///
/// [`Responder`]: crate::response::Responder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseDecision {
    /// Time to wait before responding.
    pub delay: Duration,
    /// Whether to answer with a server error.
    pub should_fail: bool,
}

/// Formats as the suffix of the per-request log line.
impl fmt::Display for ResponseDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.delay.is_zero() {
            write!(f, "; delay {:.3} ms", self.delay.as_secs_f64() * 1000.0)?;
        }
        if self.should_fail {
            write!(f, "; failing")
        } else {
            write!(f, "; OK")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rand::prelude::*;

    #[test]
    fn unknown_identity_ignores_headers() {
        let identity = ServiceIdentity::default();
        let headers = header_map(&[("x-unknown-delay", "100"), ("x-unknown-error", "1")]);

        let params = RequestParameters::from_headers(&identity, &headers);

        assert_eq!(params, RequestParameters::default());
    }

    #[test]
    fn reads_namespaced_headers() {
        let identity = svc_identity();
        let headers = header_map(&[("x-svc-delay", "100"), ("x-svc-error", " 0.25 ")]);

        let params = RequestParameters::from_headers(&identity, &headers);

        assert_eq!(params.mean_delay_ms, 100.0);
        assert_eq!(params.error_rate, 0.25);
    }

    #[test]
    fn other_namespaces_are_ignored() {
        let identity = svc_identity();
        let headers = header_map(&[("x-other-delay", "100"), ("x-other-error", "1")]);

        let params = RequestParameters::from_headers(&identity, &headers);

        assert_eq!(params, RequestParameters::default());
    }

    #[test]
    fn malformed_values_are_zero() {
        let identity = svc_identity();

        for value in ["notanumber", "", "NaN", "0x", "0x+1", "0xZZ"] {
            let headers = header_map(&[("x-svc-delay", value), ("x-svc-error", value)]);
            let params = RequestParameters::from_headers(&identity, &headers);

            assert_eq!(params, RequestParameters::default(), "value {:?}", value);
        }
    }

    #[test]
    fn infinite_delay_is_zero() {
        let identity = svc_identity();

        for value in ["inf", "-inf", "1e400"] {
            let headers = header_map(&[("x-svc-delay", value)]);
            let params = RequestParameters::from_headers(&identity, &headers);

            assert_eq!(params.mean_delay_ms, 0.0, "value {:?}", value);
        }
    }

    #[test]
    fn huge_error_rate_always_fails() {
        let identity = svc_identity();
        let mut rng = StdRng::seed_from_u64(0);

        for value in ["1e400", "inf", "Infinity"] {
            let headers = header_map(&[("x-svc-error", value)]);
            let params = RequestParameters::from_headers(&identity, &headers);

            assert_eq!(params.error_rate, f64::INFINITY, "value {:?}", value);
            for _ in 0..100 {
                assert!(params.decide(&mut rng).should_fail, "value {:?}", value);
            }
        }
    }

    #[test]
    fn negative_infinite_error_rate_never_fails() {
        let identity = svc_identity();
        let headers = header_map(&[("x-svc-error", "-inf")]);

        let params = RequestParameters::from_headers(&identity, &headers);

        assert!(!params.decide(&mut StdRng::seed_from_u64(0)).should_fail);
    }

    #[test]
    fn hexadecimal_values() {
        let identity = svc_identity();
        let headers = header_map(&[("x-svc-delay", " 0x10 "), ("x-svc-error", "0X1")]);

        let params = RequestParameters::from_headers(&identity, &headers);

        assert_eq!(params.mean_delay_ms, 16.0);
        assert_eq!(params.error_rate, 1.0);
    }

    #[test]
    fn error_rate_is_not_clamped() {
        let identity = svc_identity();
        let headers = header_map(&[("x-svc-error", "-3"), ("x-svc-delay", "-20")]);

        let params = RequestParameters::from_headers(&identity, &headers);
        assert_eq!(params.error_rate, -3.0);

        let decision = params.decide(&mut StdRng::seed_from_u64(0));
        assert_eq!(decision, ResponseDecision::default());
    }

    #[test]
    fn decision_always_fails() {
        let mut rng = StdRng::seed_from_u64(8);
        let params = RequestParameters {
            mean_delay_ms: 0.0,
            error_rate: 1.0,
        };

        for _ in 0..100 {
            let decision = params.decide(&mut rng);
            assert!(decision.should_fail);
            assert!(decision.delay.is_zero());
        }
    }

    #[test]
    fn decision_display() {
        let ok = ResponseDecision::default();
        let slow_failure = ResponseDecision {
            delay: Duration::from_millis(12),
            should_fail: true,
        };

        assert_eq!(ok.to_string(), "; OK");
        assert_eq!(slow_failure.to_string(), "; delay 12.000 ms; failing");
    }
}
