use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::warn;

/// Bound on the whole request/response cycle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything the dispatcher needs to know about one call, besides the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The target as given, before [`crate::transport::normalize_url`].
    pub url: String,
    pub headers: HeaderList,
    pub auth: AuthConfig,
    pub timeout: Duration,
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderList::default(),
            auth: AuthConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Raw `Name:Value` header entries, in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderList(Vec<String>);

impl HeaderList {
    pub fn push(&mut self, raw: impl AsRef<str>) {
        self.0.push(raw.as_ref().trim().to_owned());
    }

    pub fn raw(&self) -> &[String] {
        &self.0
    }

    /// Entries split on their first colon. Entries without one are skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|raw| {
            let pair = split_header(raw);
            if pair.is_none() {
                warn!(header = %raw, "dropping header without a colon");
            }
            pair
        })
    }
}

impl<S: AsRef<str>> FromIterator<S> for HeaderList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut headers = Self::default();
        for it in iter {
            headers.push(it);
        }
        headers
    }
}

pub fn split_header(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once(':')?;
    Some((name.trim(), value.trim()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthConfig {
    /// `user:pass`, encoded as given.
    pub basic: Option<String>,
    /// Sent verbatim as the `Cookie` header.
    pub cookie: Option<String>,
}

impl AuthConfig {
    /// The `Authorization` header value, if basic credentials are set.
    ///
    /// The token is `Basic: `, not RFC 7617's `Basic `.
    pub fn authorization(&self) -> Option<String> {
        self.basic
            .as_ref()
            .map(|credentials| format!("Basic: {}", BASE64.encode(credentials)))
    }
}
