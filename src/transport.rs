use std::{borrow::Cow, io::Read as _};

use tracing::debug;

use crate::{Config, Error};

const SCHEME: &str = "http://";

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Prepend `http://` unless the URL already starts with it.
///
/// Only `http://` is recognised, so `https://host` becomes
/// `http://https://host`.
pub fn normalize_url(url: &str) -> Cow<'_, str> {
    match url.starts_with(SCHEME) {
        true => Cow::Borrowed(url),
        false => Cow::Owned(format!("{SCHEME}{url}")),
    }
}

/// Headers to send, in order: `Authorization`, `Cookie`, then the configured
/// list.
///
/// Entries sharing a name (ignoring case) are merged into the first one's
/// slot, joined with `; ` for `Cookie` and `, ` otherwise.
pub fn request_headers(config: &Config) -> Vec<(String, String)> {
    let auth = [
        config.auth.authorization().map(|it| ("Authorization", it)),
        config.auth.cookie.clone().map(|it| ("Cookie", it)),
    ];
    let configured = config
        .headers
        .pairs()
        .map(|(name, value)| (name, value.to_owned()));

    let mut headers: Vec<(String, String)> = Vec::new();
    for (name, value) in auth.into_iter().flatten().chain(configured) {
        match headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((existing, merged)) => {
                let separator = match existing.eq_ignore_ascii_case("cookie") {
                    true => "; ",
                    false => ", ",
                };
                merged.push_str(separator);
                merged.push_str(&value);
            }
            None => headers.push((name.to_owned(), value)),
        }
    }
    headers
}

/// POST `body` to the configured URL and read back the whole response.
///
/// Any status is returned as-is; only failures to get a response are errors.
pub fn send(config: &Config, body: &[u8]) -> Result<RawResponse, Error> {
    let url = normalize_url(&config.url);
    let agent = ureq::AgentBuilder::new()
        .timeout(config.timeout)
        .max_idle_connections(0)
        .build();

    let mut request = agent.post(&url);
    for (name, value) in request_headers(config) {
        request = request.set(&name, &value);
    }
    debug!(
        %url,
        headers = ?request.header_names(),
        len = body.len(),
        "sending request"
    );

    let response = match request.send_bytes(body) {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => return Err(transport.into()),
    };

    let status = response.status();
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(Error::ReadBody)?;
    debug!(status, len = body.len(), "received response");
    Ok(RawResponse { status, body })
}
