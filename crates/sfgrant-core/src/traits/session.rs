//! Authenticated session trait.

use async_trait::async_trait;

use crate::sobjects::{ApiUsage, CreateResult, ObjectDescribe, QueryResult, SObjectSummary};
use crate::types::{InstanceUrl, SessionId};
use crate::Result;

/// An authenticated session against a Salesforce org.
///
/// The session is owned by the caller for the duration of all subsequent
/// calls; there is no explicit teardown. Each operation is one blocking
/// request/response; no state is retained between calls.
#[async_trait]
pub trait Session: Send + Sync {
    /// Returns the instance URL this session is bound to.
    fn instance(&self) -> &InstanceUrl;

    /// Returns the session id for this session.
    fn session_id(&self) -> SessionId;

    /// Create a record of the given sobject type.
    ///
    /// Used with `"PermissionSet"` and `"FieldPermissions"`. The returned
    /// [`CreateResult`] carries the server's success flag and error list;
    /// a non-2xx response is an error at this level.
    async fn create(
        &self,
        object_type: &str,
        record: &serde_json::Value,
    ) -> Result<CreateResult>;

    /// Run a SOQL query.
    async fn query(&self, soql: &str) -> Result<QueryResult>;

    /// Describe one object: label, custom flag, fields.
    async fn describe(&self, object_name: &str) -> Result<ObjectDescribe>;

    /// List all objects in the org.
    async fn describe_global(&self) -> Result<Vec<SObjectSummary>>;

    /// Fetch the org's daily API request usage.
    async fn limits(&self) -> Result<ApiUsage>;
}
