use std::io;

use thiserror::Error;

/// Everything that can end an invocation.
///
/// None of these are retried; each one fails the call as a whole.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid params: {0}")]
    InvalidParams(#[source] serde_json::Error),
    #[error("method name must not be empty")]
    EmptyMethod,
    #[error("failed to encode JSON: {0}")]
    Encoding(#[source] serde_json::Error),
    /// DNS, connect, timeout and the like. No response was received.
    #[error(transparent)]
    Transport(Box<ureq::Transport>),
    #[error("failed to read response body: {0}")]
    ReadBody(#[source] io::Error),
    #[error("http response with status code {status} and body {body}")]
    Http { status: u16, body: String },
    /// The server's `error` member, serialized back to JSON.
    #[error("{0}")]
    Rpc(String),
    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl Error {
    /// Raised before any network traffic happens.
    pub fn is_input(&self) -> bool {
        matches!(self, Error::InvalidParams(_) | Error::EmptyMethod)
    }
}

impl From<ureq::Transport> for Error {
    fn from(err: ureq::Transport) -> Self {
        Error::Transport(Box::new(err))
    }
}
