//! Command line and environment configuration.

use crate::{
    error::Error,
    identity::{ServiceIdentity, DEFAULT_COLOR, UNKNOWN_NAME},
};
use clap::Parser;
use std::net::SocketAddr;

/// Configuration of the responder process.
#[derive(Parser, Debug, Clone)]
#[command(about = "HTTP responder with header-driven latency and error injection")]
pub struct Config {
    /// Colour token returned in the response body.
    #[arg(long, env = "TBN_COLOR", default_value = DEFAULT_COLOR)]
    pub color: String,

    /// Service name namespacing the fault headers, `unknown` disables them.
    #[arg(long, env = "TBN_NAME", default_value = UNKNOWN_NAME)]
    pub name: String,

    /// Address to listen on.
    #[arg(long, env = "TBN_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,
}

impl Config {
    /// Build the identity described by this configuration.
    pub fn identity(&self) -> Result<ServiceIdentity, Error> {
        ServiceIdentity::new(&self.name, &self.color)
    }
}
