//! Salesforce API trait.

use async_trait::async_trait;

use crate::{Credentials, Result};

use super::Session;

/// An authentication capability for a Salesforce org.
///
/// Implementations exchange [`Credentials`] for an authenticated
/// [`Session`]; everything after login goes through the session. Defining
/// this as a trait lets callers substitute a test double for the remote
/// service.
#[async_trait]
pub trait SalesforceApi: Send + Sync {
    /// Session type for this API.
    type Session: Session;

    /// Authenticate and create a new session.
    ///
    /// Any error from the authenticator propagates unchanged; no retry, no
    /// backoff.
    async fn login(&self, credentials: Credentials) -> Result<Self::Session>;
}
