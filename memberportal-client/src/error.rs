/// Error handling for the portal client
///
/// This module provides a unified error type for everything the client does:
/// transport failures, non-success HTTP statuses (with the back end's
/// problem body when there is one), undecodable payloads, client-side form
/// validation and authorization refusals.
///
/// # Example
///
/// ```
/// use memberportal_client::error::{ClientError, ClientResult, FieldError};
///
/// fn check_login(login: &str) -> ClientResult<()> {
///     if login.is_empty() {
///         return Err(ClientError::InvalidForm(vec![FieldError::new("login", "required")]));
///     }
///     Ok(())
/// }
///
/// assert!(check_login("").is_err());
/// ```

use memberportal_shared::alerts::EMAIL_NOT_FOUND_TYPE;
use memberportal_shared::auth::authorization::AuthzError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {}", .problem.as_ref().map(Problem::summary).unwrap_or_default())]
    Status {
        status: StatusCode,
        problem: Option<Problem>,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Session may not perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(#[from] AuthzError),

    /// Client-side form validation failed
    #[error("Form validation failed: {} errors", .0.len())]
    InvalidForm(Vec<FieldError>),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status, for status errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Problem type URI, for status errors carrying a problem body
    pub fn problem_type(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                problem: Some(problem),
                ..
            } => problem.problem_type.as_deref(),
            _ => None,
        }
    }

    /// True for the "e-mail address not registered" problem
    pub fn is_email_not_found(&self) -> bool {
        self.status() == Some(StatusCode::BAD_REQUEST)
            && self.problem_type() == Some(EMAIL_NOT_FOUND_TYPE)
    }

    /// Short message suitable for showing next to a form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status {
                problem: Some(problem),
                ..
            } => problem.summary(),
            ClientError::Status { status, .. } => format!("Request failed ({})", status),
            ClientError::Transport(_) => "The server could not be reached".to_string(),
            other => other.to_string(),
        }
    }
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message or code
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Converts `validator` errors into field errors
impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        ClientError::InvalidForm(details)
    }
}

/// Problem body (RFC 7807 style) returned by the back-end services
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Problem type URI
    #[serde(rename = "type", default)]
    pub problem_type: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub detail: Option<String>,

    /// Message key such as `error.validation`
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub field_errors: Vec<ProblemFieldError>,
}

/// Field error inside a problem body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemFieldError {
    #[serde(default)]
    pub object_name: Option<String>,

    pub field: String,

    pub message: String,
}

impl Problem {
    /// One-line description
    pub fn summary(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
