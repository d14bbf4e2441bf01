//! Unified error types for the budget client.
//!
//! Remote failures are sorted into four kinds the UI reacts to differently:
//! transport failures, an expired credential, a duplicate-budget conflict, and
//! every other non-2xx response. Local validation and configuration problems
//! share the same enum so command functions can use a single `Result`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Fallback shown when the server rejects a request without a `detail` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors produced by the client library.
#[derive(Debug, Error)]
pub enum Error {
    /// Network unreachable, connection refused, or the transport timed out.
    #[error("Transport error: {message}")]
    Transport {
        /// Description from the underlying HTTP client
        message: String,
    },

    /// The server answered 401; the held credential is no longer valid.
    #[error("Credential invalid or expired")]
    AuthExpired,

    /// The server answered 409 when creating a budget.
    #[error("Conflict: {message}")]
    ValidationConflict {
        /// Server detail text, or a default description of the conflict
        message: String,
    },

    /// Any other non-2xx response.
    #[error("API error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api {
        /// HTTP status code
        status: u16,
        /// `detail` field of the error body, when the server sent one
        detail: Option<String>,
    },

    /// A command needing a credential was invoked before logging in.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The session already holds a budget for this category and month.
    #[error("Budget for {category} in {} already exists", month.format("%Y-%m"))]
    DuplicateBudget {
        /// Category of the rejected budget
        category: String,
        /// First day of the rejected budget's month
        month: NaiveDate,
    },

    /// Amounts must be strictly positive.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A budget with a zero or negative ceiling cannot produce a percentage.
    #[error("Budget {budget_id} has a non-positive amount ({amount})")]
    DivisionInvalid {
        /// Id of the offending budget
        budget_id: i64,
        /// Its amount
        amount: Decimal,
    },

    /// User input failed a local check.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Decoder message
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What failed
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text to show the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => {
                "Could not connect to the server. Is the backend running?".to_string()
            }
            Self::AuthExpired => "Session expired. Please login again.".to_string(),
            Self::ValidationConflict { .. } => {
                "Duplicate budget! You already have this budget.".to_string()
            }
            Self::Api { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Self::NotAuthenticated => "Please login first.".to_string(),
            Self::DuplicateBudget { category, .. } => format!(
                "You already have a budget for \"{category}\" in this month. Please edit it instead."
            ),
            Self::InvalidInput { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure means the credential must be discarded.
    #[must_use]
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode {
                message: value.to_string(),
            }
        } else {
            Self::Transport {
                message: value.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_server_detail() {
        let err = Error::Api {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_api_error_falls_back_without_detail() {
        let err = Error::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_conflict_message_is_distinct_from_generic_failure() {
        let conflict = Error::ValidationConflict {
            message: "exists".to_string(),
        };
        assert_ne!(conflict.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(conflict.user_message().contains("Duplicate budget"));
    }

    #[test]
    fn test_only_auth_expired_clears_credentials() {
        assert!(Error::AuthExpired.is_auth_expired());
        assert!(
            !Error::Transport {
                message: "refused".to_string()
            }
            .is_auth_expired()
        );
    }
}
