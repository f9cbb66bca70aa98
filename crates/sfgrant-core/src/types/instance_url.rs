//! Instance URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated Salesforce base URL.
///
/// Used both for the authentication endpoint (`login.salesforce.com` /
/// `test.salesforce.com`) and for the org instance returned by a successful
/// login. Must be HTTPS; HTTP is allowed only for localhost so tests can run
/// against a local mock server.
///
/// # Example
///
/// ```
/// use sfgrant_core::InstanceUrl;
///
/// let instance = InstanceUrl::new("https://na139.salesforce.com").unwrap();
/// assert_eq!(instance.rest_url("v59.0", "limits"),
///            "https://na139.salesforce.com/services/data/v59.0/limits");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceUrl(Url);

impl InstanceUrl {
    /// Create a new instance URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, has no host, or uses a
    /// scheme other than HTTPS (HTTP for localhost excepted).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::InstanceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Derive the instance URL from a full endpoint URL, keeping only the
    /// origin (scheme, host, port).
    ///
    /// The SOAP login response reports a `serverUrl` pointing at a SOAP
    /// endpoint path on the assigned instance; REST calls go to the same
    /// origin.
    pub fn from_endpoint(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::InstanceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        let host = url.host_str().ok_or_else(|| InvalidInputError::InstanceUrl {
            value: s.to_string(),
            reason: "must have a host".to_string(),
        })?;

        let origin = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };

        Self::new(origin)
    }

    /// Returns the SOAP endpoint URL for the given API version.
    pub fn soap_url(&self, version: &str) -> String {
        format!("{}/services/Soap/u/{}", self.as_str(), version)
    }

    /// Returns the REST endpoint URL for the given API version and path.
    pub fn rest_url(&self, version: &str, path: &str) -> String {
        format!("{}/services/data/{}/{}", self.as_str(), version, path)
    }

    /// Returns the base URL as a string, without a trailing slash.
    ///
    /// The url crate always renders a trailing slash on root paths; it is
    /// trimmed here so endpoint URLs compose cleanly.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::InstanceUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::InstanceUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::InstanceUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for InstanceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstanceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for InstanceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        InstanceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for InstanceUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let url = InstanceUrl::new("https://na139.salesforce.com").unwrap();
        assert_eq!(url.host(), Some("na139.salesforce.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let url = InstanceUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.host(), Some("127.0.0.1"));
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(InstanceUrl::new("http://na139.salesforce.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(InstanceUrl::new("/services/data").is_err());
    }

    #[test]
    fn soap_url_construction() {
        let url = InstanceUrl::new("https://login.salesforce.com").unwrap();
        assert_eq!(
            url.soap_url("59.0"),
            "https://login.salesforce.com/services/Soap/u/59.0"
        );
    }

    #[test]
    fn rest_url_construction() {
        let url = InstanceUrl::new("https://na139.salesforce.com/").unwrap();
        assert_eq!(
            url.rest_url("v59.0", "sobjects/PermissionSet"),
            "https://na139.salesforce.com/services/data/v59.0/sobjects/PermissionSet"
        );
    }

    #[test]
    fn from_endpoint_keeps_origin() {
        let url = InstanceUrl::from_endpoint(
            "https://na139.salesforce.com/services/Soap/u/59.0/00D000000000001",
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://na139.salesforce.com");
    }

    #[test]
    fn from_endpoint_keeps_port() {
        let url = InstanceUrl::from_endpoint("http://127.0.0.1:9099/services/Soap/u/59.0").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9099");
    }
}
