//! Session id token type.

use std::fmt;

/// An opaque session id returned by a successful login.
///
/// Sent as the bearer credential on every REST call. Never exposed in Debug
/// output to prevent accidental logging.
#[derive(Clone)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session id.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the session id as a string slice.
    ///
    /// Use this only when constructing authenticated requests or persisting
    /// the session. Never log or display this value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_token_in_debug() {
        let id = SessionId::new("00D5e000!AQcAQH0dMHZfz972Szmpkw");
        let debug = format!("{:?}", id);
        assert!(!debug.contains("AQcAQH0dMHZfz972Szmpkw"));
        assert!(debug.contains("[REDACTED]"));
    }
}
