//! REST-backed Salesforce API implementation.

use async_trait::async_trait;
use tracing::{error, info, instrument};

use sfgrant_core::error::{AuthError, Error};
use sfgrant_core::traits::SalesforceApi;
use sfgrant_core::types::{Domain, InstanceUrl, SessionId};
use sfgrant_core::{Credentials, Result};

use crate::API_VERSION;
use crate::rest::client::transport;
use crate::session::RestSession;

/// A network-backed Salesforce API using SOAP login and the REST data API.
///
/// Login performs the SOAP username/password flow: the security token is
/// appended to the password and exchanged for a session id and the org's
/// assigned instance URL. All subsequent calls go through [`RestSession`].
#[derive(Debug, Clone)]
pub struct RestApi {
    auth_url: InstanceUrl,
    client: reqwest::Client,
}

impl RestApi {
    /// Create a new API handle authenticating against the given domain.
    pub fn new(domain: Domain) -> Self {
        Self::with_auth_url(domain.auth_url())
    }

    /// Create a new API handle authenticating against an explicit URL.
    ///
    /// Intended for tests running against a local mock server; production
    /// callers should use [`RestApi::new`].
    pub fn with_auth_url(auth_url: InstanceUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sfgrant/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { auth_url, client }
    }

    /// Returns the authentication URL for this instance.
    pub fn auth_url(&self) -> &InstanceUrl {
        &self.auth_url
    }
}

#[async_trait]
impl SalesforceApi for RestApi {
    type Session = RestSession;

    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    async fn login(&self, credentials: Credentials) -> Result<Self::Session> {
        info!(username = credentials.username(), "Connecting to Salesforce");

        let url = self.auth_url.soap_url(API_VERSION);
        let envelope = login_envelope(&credentials);

        let response = match self
            .client
            .post(&url)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(envelope)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let e = transport(e);
                error!(error = %e, "Error connecting to Salesforce");
                return Err(e);
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let err = Error::Auth(login_fault(&body));
            error!(error = %err, "Error connecting to Salesforce");
            return Err(err);
        }

        let session_id = match extract_tag(&body, "sessionId") {
            Some(id) => id,
            None => {
                let err = Error::Auth(AuthError::UnexpectedResponse {
                    message: "login response missing sessionId".to_string(),
                });
                error!(error = %err, "Error connecting to Salesforce");
                return Err(err);
            }
        };

        let server_url = match extract_tag(&body, "serverUrl") {
            Some(url) => url,
            None => {
                let err = Error::Auth(AuthError::UnexpectedResponse {
                    message: "login response missing serverUrl".to_string(),
                });
                error!(error = %err, "Error connecting to Salesforce");
                return Err(err);
            }
        };

        let instance = InstanceUrl::from_endpoint(&server_url)?;
        info!(instance = %instance, "Successfully connected to Salesforce");

        Ok(RestSession::new(instance, SessionId::new(session_id)))
    }
}

/// Build the SOAP login envelope for the partner API.
///
/// The security token is appended to the password, per the
/// username/password/token flow.
fn login_envelope(credentials: &Credentials) -> String {
    let username = xml_escape(credentials.username());
    let password = xml_escape(&format!(
        "{}{}",
        credentials.password(),
        credentials.security_token()
    ));

    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body>
    <n1:login xmlns:n1="urn:partner.soap.sforce.com">
      <n1:username>{}</n1:username>
      <n1:password>{}</n1:password>
    </n1:login>
  </env:Body>
</env:Envelope>"#,
        username, password
    )
}

/// Parse a SOAP fault body into an authentication error.
fn login_fault(body: &str) -> AuthError {
    let code = extract_tag(body, "sf:exceptionCode")
        .or_else(|| extract_tag(body, "faultcode"))
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let message = extract_tag(body, "sf:exceptionMessage")
        .or_else(|| extract_tag(body, "faultstring"))
        .unwrap_or_else(|| "login request rejected".to_string());

    AuthError::LoginFailed { code, message }
}

/// Extract the text content of the first occurrence of an XML tag.
///
/// The login exchange touches a handful of flat, well-known tags; a full
/// XML parser is not warranted for it.
fn extract_tag(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;

    Some(body[start..end].to_string())
}

/// Escape text for inclusion in XML element content.
fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
