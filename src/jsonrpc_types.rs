//! Types for the [`JSON-RPC 1.0` Specification](https://www.jsonrpc.org/specification_v1).
//!
//! > When quoted, the specification will appear as blockquoted text, like so.

use serde::{
    de::{Error as _, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;

use crate::Error;

/// A `JSON-RPC 1.0` request object.
///
/// Only one call is ever in flight, so the `id` is always [`FixedId`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// > The request id. This can be of any type. It is used to match the
    /// > response with the request that it is replying to.
    pub id: FixedId,
    /// > A String containing the name of the method to be invoked.
    pub method: String,
    /// > An Array of objects to pass as arguments to the method.
    ///
    /// Any JSON value is sent as-is, including scalars and `null`.
    pub params: Value,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Value) -> Result<Self, Error> {
        let method = method.into();
        if method.is_empty() {
            return Err(Error::EmptyMethod);
        }
        Ok(Self {
            id: FixedId,
            method,
            params,
        })
    }
}

/// Assemble the request document for `method` and serialize it.
pub fn build(method: &str, params: Value) -> Result<Vec<u8>, Error> {
    let request = Request::new(method, params)?;
    serde_json::to_vec(&request).map_err(Error::Encoding)
}

/// A witness of the literal request id `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedId;

impl FixedId {
    pub const VALUE: u64 = 1;
}

impl<'de> Deserialize<'de> for FixedId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u64::deserialize(deserializer)? {
            Self::VALUE => Ok(Self),
            other => Err(D::Error::invalid_value(Unexpected::Unsigned(other), &"1")),
        }
    }
}

impl Serialize for FixedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(Self::VALUE)
    }
}

/// A `JSON-RPC 1.0` response object, as far as the envelope is concerned.
///
/// The `id` is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// > An Error object if there was an error invoking the method.
    /// > It must be null if there was no error.
    ///
    /// Absent and `null` both map to [`None`].
    pub error: Option<Value>,
    /// > The Object that was returned by the invoked method.
    /// > This must be null in case there was an error invoking the method.
    ///
    /// [`None`] when the member is missing, `Some(Value::Null)` when it is `null`.
    pub result: Option<Value>,
}

impl From<Value> for Response {
    /// Documents that are not JSON Objects carry neither member.
    fn from(document: Value) -> Self {
        let Value::Object(mut members) = document else {
            return Self::default();
        };
        Self {
            error: members.remove("error").filter(|it| !it.is_null()),
            result: members.remove("result"),
        }
    }
}

impl Response {
    /// Settle on exactly one outcome: an `error` wins over any `result`.
    pub fn into_outcome(self) -> Result<Option<Value>, Error> {
        match self.error {
            Some(error) => Err(Error::Rpc(
                serde_json::to_string(&error).map_err(Error::Encoding)?,
            )),
            None => Ok(self.result),
        }
    }
}
