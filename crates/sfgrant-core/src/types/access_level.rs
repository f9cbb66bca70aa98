//! Field access level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The access granted on a field under a permission set.
///
/// Parsing rejects anything outside `"read"` / `"edit"` before any remote
/// call is made.
///
/// Both levels grant read access: `grants_read` is true for [`Read`] and
/// [`Edit`] alike, so a read-only grant and an edit grant differ only in
/// [`grants_edit`]. This matches the upstream permission model, where no
/// field permission is ever created with read access withheld.
///
/// [`Read`]: AccessLevel::Read
/// [`Edit`]: AccessLevel::Edit
/// [`grants_edit`]: AccessLevel::grants_edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Read-only access.
    #[default]
    Read,
    /// Read and edit access.
    Edit,
}

impl AccessLevel {
    /// Whether field permissions at this level set `PermissionsRead`.
    ///
    /// Always true; see the type-level note.
    pub fn grants_read(&self) -> bool {
        matches!(self, AccessLevel::Read | AccessLevel::Edit)
    }

    /// Whether field permissions at this level set `PermissionsEdit`.
    pub fn grants_edit(&self) -> bool {
        matches!(self, AccessLevel::Edit)
    }

    /// Returns the level as its wire string ("read" or "edit").
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Read => "read",
            AccessLevel::Edit => "edit",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessLevel::Read),
            "edit" => Ok(AccessLevel::Edit),
            other => Err(InvalidInputError::AccessLevel {
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
