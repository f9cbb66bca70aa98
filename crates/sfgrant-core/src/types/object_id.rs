//! Salesforce record id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A server-assigned Salesforce record id.
///
/// Salesforce ids are 15 (case-sensitive) or 18 (case-safe) alphanumeric
/// characters. The format is validated at construction; semantics (which
/// object the id belongs to) are left to the server.
///
/// # Example
///
/// ```
/// use sfgrant_core::ObjectId;
///
/// let id = ObjectId::new("0PS5e000001Sv2PGAS").unwrap();
/// assert_eq!(id.as_str(), "0PS5e000001Sv2PGAS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a new record id from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not 15 or 18 alphanumeric characters.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        if s.len() != 15 && s.len() != 18 {
            return Err(InvalidInputError::ObjectId {
                value: s,
                reason: "must be 15 or 18 characters".to_string(),
            }
            .into());
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidInputError::ObjectId {
                value: s,
                reason: "must contain only ASCII letters and digits".to_string(),
            }
            .into());
        }

        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectId::new(s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_18_char_id() {
        assert!(ObjectId::new("0PS5e000001Sv2PGAS").is_ok());
    }

    #[test]
    fn accepts_15_char_id() {
        assert!(ObjectId::new("0PS5e000001Sv2P").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ObjectId::new("0PS5e").is_err());
        assert!(ObjectId::new("").is_err());
    }

    #[test]
    fn rejects_non_alphanumeric() {
        assert!(ObjectId::new("0PS5e000001Sv2P-AS").is_err());
    }
}
