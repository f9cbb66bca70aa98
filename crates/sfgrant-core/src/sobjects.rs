//! Salesforce object payloads and read models.
//!
//! Request payloads serialize with Salesforce's PascalCase field names;
//! read models mirror the REST API's camelCase response shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};
use crate::types::{AccessLevel, ObjectId};

/// SObject type name for permission sets.
pub const PERMISSION_SET: &str = "PermissionSet";

/// SObject type name for field permissions.
pub const FIELD_PERMISSIONS: &str = "FieldPermissions";

/// A permission set create payload.
///
/// The name, label, and description are derived from the object name and
/// record type:
///
/// ```
/// use sfgrant_core::PermissionSet;
///
/// let ps = PermissionSet::for_record_type("Account", "edit").unwrap();
/// assert_eq!(ps.name, "Account_edit_Permissions");
/// assert_eq!(ps.label, "Account edit Permissions");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PermissionSet {
    /// API name, `{object}_{record_type}_Permissions`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Display label, `{object} {record_type} Permissions`.
    #[serde(rename = "Label")]
    pub label: String,
    /// Human-readable description.
    #[serde(rename = "Description")]
    pub description: String,
}

impl PermissionSet {
    /// Build the payload for an object/record-type pair.
    ///
    /// No de-duplication check is performed here; creating the same pair
    /// twice yields two server-side objects or a server-side conflict error.
    ///
    /// # Errors
    ///
    /// Returns an error if the object name is empty.
    pub fn for_record_type(object_name: &str, record_type: &str) -> Result<Self, Error> {
        if object_name.is_empty() {
            return Err(InvalidInputError::ObjectName {
                value: object_name.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            name: format!("{}_{}_Permissions", object_name, record_type),
            label: format!("{} {} Permissions", object_name, record_type),
            description: format!(
                "Permission set for {} with record type {}",
                object_name, record_type
            ),
        })
    }
}

/// A field permission create payload.
#[derive(Debug, Clone, Serialize)]
pub struct FieldPermission {
    /// Qualified field name, `{object}.{field}`.
    #[serde(rename = "Field")]
    pub field: String,
    /// Whether read access is granted.
    #[serde(rename = "PermissionsRead")]
    pub permissions_read: bool,
    /// Whether edit access is granted.
    #[serde(rename = "PermissionsEdit")]
    pub permissions_edit: bool,
    /// The parent permission set's record id.
    #[serde(rename = "ParentId")]
    pub parent_id: ObjectId,
}

impl FieldPermission {
    /// Build the payload granting `access_level` on one field under a
    /// permission set.
    pub fn new(parent_id: &ObjectId, object_name: &str, field: &str, access_level: AccessLevel) -> Self {
        Self {
            field: format!("{}.{}", object_name, field),
            permissions_read: access_level.grants_read(),
            permissions_edit: access_level.grants_edit(),
            parent_id: parent_id.clone(),
        }
    }
}

/// One error entry from a create response or REST error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFault {
    /// Salesforce status code (e.g. `REQUIRED_FIELD_MISSING`).
    #[serde(default)]
    pub status_code: Option<String>,
    /// Error message.
    pub message: String,
    /// Fields the error refers to, if any.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref code) = self.status_code {
            write!(f, "{}: ", code)?;
        }
        write!(f, "{}", self.message)?;
        if !self.fields.is_empty() {
            write!(f, " ({})", self.fields.join(", "))?;
        }
        Ok(())
    }
}

/// Response payload of an sobject create call.
///
/// `success: false` with a populated error list is a logical failure on a
/// structurally successful response; callers decide how to surface it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResult {
    /// The created record's id, present on success.
    #[serde(default)]
    pub id: Option<ObjectId>,
    /// Whether the server accepted the create.
    pub success: bool,
    /// The server's reported errors, populated on failure.
    #[serde(default)]
    pub errors: Vec<ApiFault>,
}

/// Response payload of a SOQL query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Total number of matching records.
    pub total_size: u32,
    /// Whether this response contains the full result set.
    pub done: bool,
    /// The matching records as raw JSON objects.
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

/// An existing permission set, from a SOQL query over `PermissionSet`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionSetRecord {
    /// The permission set's record id.
    pub id: ObjectId,
    /// API name.
    pub name: String,
}

/// A record type of an object, from a SOQL query over `RecordType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordTypeInfo {
    /// The record type's id.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// API developer name.
    pub developer_name: String,
}

/// An object description, from the describe endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDescribe {
    /// API name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether this is a custom object.
    pub custom: bool,
    /// The object's fields.
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
}

/// One field of an object description.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescribe {
    /// API name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the field accepts writes.
    #[serde(default)]
    pub updateable: bool,
}

/// One object summary from the global describe endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SObjectSummary {
    /// API name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether this is a custom object.
    pub custom: bool,
}

/// Daily API request usage, from the limits endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiUsage {
    /// Requests remaining today.
    pub remaining: u64,
    /// Daily request ceiling.
    pub max: u64,
}
