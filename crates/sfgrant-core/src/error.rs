//! Error types for the sfgrant libraries.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, REST, API-reported, and input validation
//! failures, so callers can distinguish them without string inspection.

use std::fmt;
use thiserror::Error;

use crate::sobjects::ApiFault;

/// The unified error type for sfgrant operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, malformed login response).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// REST errors: the API rejected the request with a non-2xx response.
    #[error("REST error: {0}")]
    Rest(#[from] RestError),

    /// API-reported failures: a structurally successful response whose
    /// payload declares `success: false`, with the server's error list.
    #[error("API failure: {0}")]
    Api(#[from] ApiFailure),

    /// Input validation errors (access level, domain, object name, id, URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login endpoint rejected the credentials.
    #[error("login failed [{code}]: {message}")]
    LoginFailed {
        /// Fault code reported by the server (e.g. `INVALID_LOGIN`).
        code: String,
        /// Fault message reported by the server.
        message: String,
    },

    /// The login response did not contain the expected fields.
    #[error("unexpected login response: {message}")]
    UnexpectedResponse { message: String },

    /// The session is no longer valid on the server.
    #[error("session expired or invalid")]
    SessionExpired,
}

/// A non-2xx REST response from the API.
#[derive(Debug)]
pub struct RestError {
    /// HTTP status code.
    pub status: u16,
    /// Salesforce error code (e.g. `INVALID_SESSION_ID`), if present.
    pub error_code: Option<String>,
    /// Error message from the server, if present.
    pub message: Option<String>,
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.error_code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Create a new REST error.
    pub fn new(status: u16, error_code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error_code,
            message,
        }
    }

    /// Check if this response indicates the session is no longer valid.
    pub fn is_session_expired(&self) -> bool {
        self.status == 401 || self.error_code.as_deref() == Some("INVALID_SESSION_ID")
    }
}

/// A create call whose payload reported `success: false`.
///
/// The response was syntactically valid; the server declined the operation
/// and reported why in its error list.
#[derive(Debug)]
pub struct ApiFailure {
    /// What was being created when the server reported failure,
    /// e.g. `"PermissionSet Account_edit_Permissions"` or
    /// `"field permission Contact.Email"`.
    pub subject: String,
    /// The server's reported errors.
    pub errors: Vec<ApiFault>,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to create {}: [", self.subject)?;
        for (i, fault) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", fault)?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for ApiFailure {}

impl ApiFailure {
    /// Create a new API failure for the given subject.
    pub fn new(subject: impl Into<String>, errors: Vec<ApiFault>) -> Self {
        Self {
            subject: subject.into(),
            errors,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Access level outside {"read", "edit"}.
    #[error("access level must be either 'read' or 'edit', got '{value}'")]
    AccessLevel { value: String },

    /// Domain outside {"login", "test"}.
    #[error("domain must be either 'login' or 'test', got '{value}'")]
    Domain { value: String },

    /// Invalid Salesforce record id.
    #[error("invalid record id '{value}': {reason}")]
    ObjectId { value: String, reason: String },

    /// Invalid object name.
    #[error("invalid object name '{value}': {reason}")]
    ObjectName { value: String, reason: String },

    /// Invalid instance URL.
    #[error("invalid instance URL '{value}': {reason}")]
    InstanceUrl { value: String, reason: String },
}
