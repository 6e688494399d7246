//! Process-wide identity of the responder.

use crate::error::Error;
use axum::{body::Bytes, http::HeaderName};

/// Name meaning that no identity was configured.
pub const UNKNOWN_NAME: &str = "unknown";

/// Default colour token returned in response bodies.
pub const DEFAULT_COLOR: &str = "FFFAC3";

/// Names of the headers that control fault injection for one identity.
#[derive(Debug, Clone)]
pub struct FaultHeaders {
    /// `x-<name>-delay`, mean delay in milliseconds.
    pub delay: HeaderName,
    /// `x-<name>-error`, probability of failing the request.
    pub error: HeaderName,
}

/// Identity of this responder and the body it answers with.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ServiceIdentity {
    name: String,
    body: Bytes,
    headers: Option<FaultHeaders>,
}

impl ServiceIdentity {
    /// Create a new identity from a service name and a colour token.
    ///
    /// The name is lowercased. The [`UNKNOWN_NAME`] placeholder disables
    /// fault injection entirely. The body is the colour followed by a
    /// newline.
    pub fn new(name: &str, color: &str) -> Result<Self, Error> {
        let name = name.to_lowercase();

        let headers = if name == UNKNOWN_NAME {
            None
        } else {
            Some(FaultHeaders {
                delay: HeaderName::try_from(format!("x-{}-delay", name))
                    .map_err(Error::invalid_name(&name))?,
                error: HeaderName::try_from(format!("x-{}-error", name))
                    .map_err(Error::invalid_name(&name))?,
            })
        };

        Ok(ServiceIdentity {
            body: Bytes::from(format!("{}\n", color)),
            name,
            headers,
        })
    }

    /// Lowercased service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body returned on success.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Fault header names, or `None` when fault injection is disabled.
    pub fn fault_headers(&self) -> Option<&FaultHeaders> {
        self.headers.as_ref()
    }
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        ServiceIdentity {
            name: UNKNOWN_NAME.to_owned(),
            body: Bytes::from(format!("{}\n", DEFAULT_COLOR)),
            headers: None,
        }
    }
}
