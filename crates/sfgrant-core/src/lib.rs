//! sfgrant-core - Core types, traits, and provisioning operations.
//!
//! This crate defines the validated domain types, the error taxonomy, the
//! [`SalesforceApi`]/[`Session`] capability traits, and the permission
//! provisioning operations built on them. Network transport lives in the
//! backend crates.

pub mod credentials;
pub mod error;
pub mod provision;
pub mod sobjects;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use provision::{
    create_edit_permission_set, create_permission_set, find_permission_set, record_types,
    set_field_permissions,
};
pub use sobjects::{
    ApiFault, ApiUsage, CreateResult, FieldDescribe, FieldPermission, ObjectDescribe,
    PermissionSet, PermissionSetRecord, QueryResult, RecordTypeInfo, SObjectSummary,
};
pub use traits::{SalesforceApi, Session};
pub use types::{AccessLevel, Domain, InstanceUrl, ObjectId, SessionId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
