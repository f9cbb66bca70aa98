//! REST-backed session implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use sfgrant_core::Result;
use sfgrant_core::sobjects::{ApiUsage, CreateResult, ObjectDescribe, QueryResult, SObjectSummary};
use sfgrant_core::traits::Session as SessionTrait;
use sfgrant_core::types::{InstanceUrl, SessionId};

use crate::API_VERSION;
use crate::rest::client::RestClient;
use crate::rest::endpoints::{
    DescribeGlobalResponse, LIMITS, LimitsResponse, QUERY, SOBJECTS, describe_path, sobject_path,
};

/// An authenticated session against a Salesforce org over REST.
#[derive(Clone)]
pub struct RestSession {
    instance: InstanceUrl,
    session_id: SessionId,
    client: RestClient,
    data_version: String,
}

impl RestSession {
    pub(crate) fn new(instance: InstanceUrl, session_id: SessionId) -> Self {
        let client = RestClient::new(instance.clone());
        Self {
            instance,
            session_id,
            client,
            data_version: format!("v{}", API_VERSION),
        }
    }

    /// Restore a session from a persisted instance URL and session id.
    ///
    /// The session id is not validated here; an expired id surfaces as a
    /// REST error on the first call.
    pub fn from_persisted(instance: InstanceUrl, session_id: SessionId) -> Self {
        Self::new(instance, session_id)
    }

    fn rest_url(&self, path: &str) -> String {
        self.instance.rest_url(&self.data_version, path)
    }
}

#[async_trait]
impl SessionTrait for RestSession {
    fn instance(&self) -> &InstanceUrl {
        &self.instance
    }

    fn session_id(&self) -> SessionId {
        self.session_id.clone()
    }

    #[instrument(skip(self, record), fields(instance = %self.instance))]
    async fn create(
        &self,
        object_type: &str,
        record: &serde_json::Value,
    ) -> Result<CreateResult> {
        debug!(object_type, "Creating sobject record");
        self.client
            .post_authed(
                &self.rest_url(&sobject_path(object_type)),
                record,
                self.session_id.as_str(),
            )
            .await
    }

    #[instrument(skip(self, soql), fields(instance = %self.instance))]
    async fn query(&self, soql: &str) -> Result<QueryResult> {
        debug!("Running SOQL query");
        self.client
            .get_authed(
                &self.rest_url(QUERY),
                &[("q", soql)],
                self.session_id.as_str(),
            )
            .await
    }

    #[instrument(skip(self), fields(instance = %self.instance))]
    async fn describe(&self, object_name: &str) -> Result<ObjectDescribe> {
        debug!(object_name, "Describing object");
        self.client
            .get_authed_no_params(
                &self.rest_url(&describe_path(object_name)),
                self.session_id.as_str(),
            )
            .await
    }

    #[instrument(skip(self), fields(instance = %self.instance))]
    async fn describe_global(&self) -> Result<Vec<SObjectSummary>> {
        debug!("Listing org objects");
        let response: DescribeGlobalResponse = self
            .client
            .get_authed_no_params(&self.rest_url(SOBJECTS), self.session_id.as_str())
            .await?;
        Ok(response.sobjects)
    }

    #[instrument(skip(self), fields(instance = %self.instance))]
    async fn limits(&self) -> Result<ApiUsage> {
        debug!("Fetching org limits");
        let response: LimitsResponse = self
            .client
            .get_authed_no_params(&self.rest_url(LIMITS), self.session_id.as_str())
            .await?;
        Ok(response.daily_api_requests)
    }
}

impl std::fmt::Debug for RestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestSession")
            .field("instance", &self.instance)
            .field("session_id", &"[REDACTED]")
            .finish()
    }
}
