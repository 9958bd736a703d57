use serde_json::Value;

use crate::{jsonrpc_types::Response, transport::RawResponse, Error};

/// Turn a raw HTTP response into the call's outcome.
///
/// - any status but `200` is an [`Error::Http`], whatever the body says
/// - a body that isn't JSON is an [`Error::Parse`]
/// - a non-`null` `error` member is an [`Error::Rpc`]
/// - otherwise the `result` member, [`None`] if it is missing
pub fn classify(status: u16, body: &[u8]) -> Result<Option<Value>, Error> {
    if status != 200 {
        return Err(Error::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
    let document: Value = serde_json::from_slice(body).map_err(Error::Parse)?;
    Response::from(document).into_outcome()
}

impl RawResponse {
    pub fn classify(&self) -> Result<Option<Value>, Error> {
        classify(self.status, &self.body)
    }
}
