//! Salesforce environment domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::types::InstanceUrl;

/// The Salesforce environment class to authenticate against.
///
/// `Login` targets production orgs (`login.salesforce.com`), `Test` targets
/// sandbox orgs (`test.salesforce.com`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Production environment.
    #[default]
    Login,
    /// Sandbox environment.
    Test,
}

impl Domain {
    /// Returns the base URL used for authentication against this domain.
    pub fn auth_url(&self) -> InstanceUrl {
        let url = match self {
            Domain::Login => "https://login.salesforce.com",
            Domain::Test => "https://test.salesforce.com",
        };
        InstanceUrl::new(url).expect("domain URLs are valid")
    }

    /// Returns the domain as its wire string ("login" or "test").
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Login => "login",
            Domain::Test => "test",
        }
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Domain::Login),
            "test" => Ok(Domain::Test),
            other => Err(InvalidInputError::Domain {
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_domains() {
        assert_eq!("login".parse::<Domain>().unwrap(), Domain::Login);
        assert_eq!("test".parse::<Domain>().unwrap(), Domain::Test);
    }

    #[test]
    fn rejects_unknown_domain() {
        let err = "production".parse::<Domain>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Domain { .. })
        ));
    }

    #[test]
    fn auth_urls() {
        assert_eq!(
            Domain::Login.auth_url().as_str(),
            "https://login.salesforce.com"
        );
        assert_eq!(
            Domain::Test.auth_url().as_str(),
            "https://test.salesforce.com"
        );
    }
}
