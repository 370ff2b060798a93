//! Backend base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// A URL that failed validation as a backend base URL.
#[derive(Debug, Error)]
#[error("invalid API URL '{value}': {reason}")]
pub struct InvalidUrlError {
    /// The rejected input.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// A validated NexusMind backend base URL.
///
/// Must be HTTPS, or HTTP for localhost (development backends run on
/// `http://localhost:8001`).
///
/// # Example
///
/// ```
/// use nexusmind_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:8001").unwrap();
/// assert_eq!(api.endpoint("/auth/me"), "http://localhost:8001/auth/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses a
    /// scheme other than HTTPS (HTTP is allowed for localhost only).
    pub fn new(s: impl AsRef<str>) -> Result<Self, InvalidUrlError> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidUrlError {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for a backend endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim before joining.
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), InvalidUrlError> {
        if url.cannot_be_a_base() {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            });
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            });
        }

        if url.host_str().is_none() {
            return Err(InvalidUrlError {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = InvalidUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https() {
        let api = ApiUrl::new("https://api.nexusmind.example").unwrap();
        assert_eq!(api.host(), Some("api.nexusmind.example"));
    }

    #[test]
    fn accepts_http_localhost() {
        assert!(ApiUrl::new("http://localhost:8001").is_ok());
        assert!(ApiUrl::new("http://127.0.0.1:8001").is_ok());
    }

    #[test]
    fn rejects_http_non_localhost() {
        assert!(ApiUrl::new("http://api.nexusmind.example").is_err());
    }

    #[test]
    fn rejects_relative_and_other_schemes() {
        assert!(ApiUrl::new("not a url").is_err());
        assert!(ApiUrl::new("ftp://example.com").is_err());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("http://localhost:8001").unwrap();
        assert_eq!(api.endpoint("auth/token"), "http://localhost:8001/auth/token");
        assert_eq!(
            api.endpoint("/ingest/alice"),
            "http://localhost:8001/ingest/alice"
        );
    }
}
