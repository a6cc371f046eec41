//! # HTTP Method Normalisation
//!
//! Method strings are normalised once, at registration time and at the top of
//! every lookup, into the closed [`HttpMethod`] enum. The trie stores methods
//! in this form so the hot path compares enum discriminants rather than raw
//! strings.
//!
//! Parsing is case-insensitive: `get`, `GET` and `Get` all become
//! [`HttpMethod::Get`]. Extension methods (WebDAV's `PROPFIND`, etc.) are kept
//! as upper-cased [`HttpMethod::Custom`] values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::router::RouterError;

/// A normalised HTTP method.
///
/// The derived ordering follows the declaration order, which is also the order
/// used when rendering an `Allow` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
    Connect,
    /// Any other RFC 9110 token, stored upper-cased.
    Custom(Box<str>),
}

impl HttpMethod {
    /// Parse a method string, ignoring ASCII case.
    ///
    /// Fails only for strings that cannot be an HTTP method token at all
    /// (empty, whitespace, separators).
    pub fn parse(raw: &str) -> Result<Self, RouterError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(is_token_byte) {
            return Err(RouterError::InvalidMethod {
                method: raw.to_string(),
            });
        }
        Ok(Self::from_token(trimmed))
    }

    /// Normalise a request method for lookup.
    ///
    /// Unlike [`HttpMethod::parse`] this never fails: a garbage method simply
    /// becomes a custom method that no route is registered under.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::from_token(raw.trim())
    }

    fn from_token(token: &str) -> Self {
        // Fast path for the standard methods without allocating.
        const KNOWN: [(&str, HttpMethod); 9] = [
            ("GET", HttpMethod::Get),
            ("HEAD", HttpMethod::Head),
            ("POST", HttpMethod::Post),
            ("PUT", HttpMethod::Put),
            ("DELETE", HttpMethod::Delete),
            ("PATCH", HttpMethod::Patch),
            ("OPTIONS", HttpMethod::Options),
            ("TRACE", HttpMethod::Trace),
            ("CONNECT", HttpMethod::Connect),
        ];
        for (name, method) in KNOWN {
            if token.eq_ignore_ascii_case(name) {
                return method;
            }
        }
        HttpMethod::Custom(token.to_ascii_uppercase().into_boxed_str())
    }

    /// The canonical upper-case name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Custom(name) => name,
        }
    }
}

// RFC 9110 `tchar`
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::parse(s)
    }
}

impl From<&http::Method> for HttpMethod {
    fn from(method: &http::Method) -> Self {
        HttpMethod::normalize(method.as_str())
    }
}

impl From<http::Method> for HttpMethod {
    fn from(method: http::Method) -> Self {
        HttpMethod::from(&method)
    }
}

impl TryFrom<&HttpMethod> for http::Method {
    type Error = http::method::InvalidMethod;

    fn try_from(method: &HttpMethod) -> Result<Self, Self::Error> {
        http::Method::from_bytes(method.as_str().as_bytes())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HttpMethod::parse(&s).map_err(serde::de::Error::custom)
    }
}
