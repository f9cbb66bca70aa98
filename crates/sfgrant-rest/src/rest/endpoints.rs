//! REST endpoint paths and wire types.

#![allow(dead_code)]

use serde::Deserialize;

use sfgrant_core::sobjects::{ApiUsage, SObjectSummary};

// ============================================================================
// Paths
// ============================================================================

/// SOQL query endpoint.
pub const QUERY: &str = "query";

/// Global describe endpoint.
pub const SOBJECTS: &str = "sobjects";

/// Org limits endpoint.
pub const LIMITS: &str = "limits";

/// Path for creating a record of the given sobject type.
pub fn sobject_path(object_type: &str) -> String {
    format!("sobjects/{}", object_type)
}

/// Path for describing one object.
pub fn describe_path(object_name: &str) -> String {
    format!("sobjects/{}/describe", object_name)
}

// ============================================================================
// Wire Types
// ============================================================================

/// One entry of a REST error response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestErrorBody {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Response from the global describe endpoint.
#[derive(Debug, Deserialize)]
pub struct DescribeGlobalResponse {
    pub sobjects: Vec<SObjectSummary>,
}

/// Response from the limits endpoint; only the daily request bucket is read.
#[derive(Debug, Deserialize)]
pub struct LimitsResponse {
    #[serde(rename = "DailyApiRequests")]
    pub daily_api_requests: ApiUsage,
}
