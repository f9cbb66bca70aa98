//! Login credentials type.

use std::fmt;

use crate::types::Domain;

/// Credentials for Salesforce username/password authentication.
///
/// Holds the username, password, the security token appended to the password
/// during login, and the [`Domain`] (production or sandbox) to authenticate
/// against.
///
/// # Security
///
/// The password and security token are never exposed in Debug output to
/// prevent accidental logging.
///
/// # Example
///
/// ```
/// use sfgrant_core::{Credentials, Domain};
///
/// let creds = Credentials::new("ops@example.com", "hunter2", "tok3n", Domain::Test);
/// assert_eq!(creds.username(), "ops@example.com");
/// ```
pub struct Credentials {
    username: String,
    password: String,
    security_token: String,
    domain: Domain,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
        domain: Domain,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
            domain,
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request.
    /// Never log or display this value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the security token.
    ///
    /// # Security
    ///
    /// Use this only when constructing the login request.
    /// Never log or display this value.
    pub fn security_token(&self) -> &str {
        &self.security_token
    }

    /// Returns the domain to authenticate against.
    pub fn domain(&self) -> Domain {
        self.domain
    }
}

// Intentionally hide secrets in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &"[REDACTED]")
            .field("domain", &self.domain)
            .finish()
    }
}

// Clone is intentionally derived to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: self.password.clone(),
            security_token: self.security_token.clone(),
            domain: self.domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_secrets_in_debug() {
        let creds = Credentials::new("ops@example.com", "secret123", "tok456", Domain::Login);
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ops@example.com"));
        assert!(!debug.contains("secret123"));
        assert!(!debug.contains("tok456"));
        assert!(debug.contains("[REDACTED]"));
    }
}
