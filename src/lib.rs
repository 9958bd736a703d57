//! Issue a single `JSON-RPC 1.0` call over HTTP.
//!
//! [`invoke`] runs the whole thing: [`jsonrpc_types::build`] the request,
//! [`transport::send`] it, and [`classify::classify`] what came back.

use serde_json::Value;
use tracing::debug;

pub mod classify;
pub mod config;
pub mod error;
pub mod jsonrpc_types;
pub mod transport;

pub use config::{AuthConfig, Config, HeaderList, DEFAULT_TIMEOUT};
pub use error::Error;
pub use jsonrpc_types::{FixedId, Request, Response};

/// Parse the caller's `params` argument.
pub fn parse_params(s: &str) -> Result<Value, Error> {
    serde_json::from_str(s).map_err(Error::InvalidParams)
}

/// Call `method` with `params` at the configured URL.
///
/// Returns the `result` member, or [`None`] if the response had none.
pub fn invoke(config: &Config, method: &str, params: Value) -> Result<Option<Value>, Error> {
    let body = jsonrpc_types::build(method, params)?;
    debug!(method, "built request");
    transport::send(config, &body)?.classify()
}

/// How a successful outcome is printed: compact JSON, `null` when absent.
pub fn render_result(result: Option<&Value>) -> Result<String, Error> {
    match result {
        Some(value) => serde_json::to_string(value).map_err(Error::Encoding),
        None => Ok(String::from("null")),
    }
}
