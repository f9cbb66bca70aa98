//! sfgrant-rest - REST-backed Salesforce implementation.

mod api;
mod rest;
mod session;

pub use api::RestApi;
pub use session::RestSession;

/// Salesforce API version used for SOAP login and REST data calls.
pub const API_VERSION: &str = "59.0";
