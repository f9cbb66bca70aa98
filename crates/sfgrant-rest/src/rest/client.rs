//! REST HTTP client implementation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use sfgrant_core::error::{Error, RestError, TransportError};
use sfgrant_core::types::InstanceUrl;

use super::endpoints::RestErrorBody;

/// Map a reqwest error onto the transport taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let inner = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(inner)
}

/// HTTP client for Salesforce REST requests.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    client: reqwest::Client,
    instance: InstanceUrl,
}

impl RestClient {
    /// Create a new REST client for the given instance.
    pub fn new(instance: InstanceUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sfgrant/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, instance }
    }

    /// Returns the instance URL this client is configured for.
    pub fn instance(&self) -> &InstanceUrl {
        &self.instance
    }

    /// Make an authenticated GET request.
    #[instrument(skip(self, token), fields(instance = %self.instance))]
    pub async fn get_authed<Q, R>(&self, url: &str, params: &Q, token: &str) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(url, "REST GET");
        trace!(?params, "query parameters");

        let response = self
            .client
            .get(url)
            .query(params)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make an authenticated GET request without query parameters.
    #[instrument(skip(self, token), fields(instance = %self.instance))]
    pub async fn get_authed_no_params<R>(&self, url: &str, token: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        debug!(url, "REST GET");

        let response = self
            .client
            .get(url)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body.
    #[instrument(skip(self, body, token), fields(instance = %self.instance))]
    pub async fn post_authed<B, R>(&self, url: &str, body: &B, token: &str) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        debug!(url, "REST POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a REST response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "REST response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Rest(error))
        }
    }

    /// Parse a REST error response.
    ///
    /// Salesforce reports REST errors as a JSON array of objects with
    /// `message` and `errorCode`; the first entry is surfaced.
    async fn parse_error_response(&self, response: reqwest::Response) -> RestError {
        let status = response.status().as_u16();

        match response.json::<Vec<RestErrorBody>>().await {
            Ok(mut errors) if !errors.is_empty() => {
                let first = errors.remove(0);
                RestError::new(status, first.error_code, Some(first.message))
            }
            _ => RestError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let instance = InstanceUrl::new("https://na139.salesforce.com").unwrap();
        let client = RestClient::new(instance.clone());
        assert_eq!(client.instance().as_str(), instance.as_str());
    }
}
