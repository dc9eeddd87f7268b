//! Typed errors and the response classifier shared by every client.

use tally_wireformat::plan::ValidationError;

/// The error code servers use to signal a credential/identity rejection.
const USER_VALIDATION_FAILED_CODE: &str = "user validation failed";

/// Error-chain fragments that indicate the service cannot be reached.
const CONNECTIVITY_FAILURES: &[&str] = &[
    "connection refused",
    "connection reset",
    "no such host",
    "network is unreachable",
];

/// Errors surfaced by the tally API clients.
///
/// Exactly one kind is produced per call; a call never yields both a decoded
/// value and an error. Nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level failure that is not a connectivity outage.
    #[error("request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    /// The service cannot be reached, or answered 503.
    #[error("{resource} service not available")]
    ServiceUnavailable {
        /// The service area that was unreachable.
        resource: &'static str,
    },

    /// The server rejected the request with a decodable error body.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The server's error message.
        message: String,
    },

    /// The server rejected the caller's identity or credentials.
    #[error("{message}")]
    UserValidationFailed {
        /// The server's error message.
        message: String,
    },

    /// A response body that could not be decoded.
    #[error(r#"received http response: {body} - code "{status}""#)]
    MalformedResponse {
        /// HTTP status text.
        status: String,
        /// The raw body.
        body: String,
    },

    /// A local precondition failed before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The client could not be constructed.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether this failure means the service is unavailable and the call
    /// may be retried out-of-band.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ServiceUnavailable { .. })
    }

    /// Whether the server rejected the caller's identity, e.g. prompting
    /// re-authentication.
    #[must_use]
    pub fn is_user_validation_failed(&self) -> bool {
        matches!(self, Error::UserValidationFailed { .. })
    }
}

/// Classifies a transport failure.
///
/// Connectivity outages (connection refused, DNS failure, and the known
/// connectivity-failure phrases) become [`Error::ServiceUnavailable`]; any
/// other transport error is propagated unchanged.
pub(crate) fn classify_transport(resource: &'static str, err: reqwest::Error) -> Error {
    if err.is_connect() || is_connectivity_failure(&error_chain_text(&err)) {
        Error::ServiceUnavailable { resource }
    } else {
        Error::RequestFailed(err)
    }
}

/// Whether `text` contains one of the known connectivity-failure phrases.
pub(crate) fn is_connectivity_failure(text: &str) -> bool {
    let text = text.to_lowercase();
    CONNECTIVITY_FAILURES
        .iter()
        .any(|phrase| text.contains(phrase))
}

fn error_chain_text(err: &reqwest::Error) -> String {
    use std::error::Error as _;

    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// The error body servers attach to non-2xx responses.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub error: String,
}

impl ErrorResponse {
    /// Whether the body signals a credential/identity rejection.
    pub fn is_user_validation_failure(&self) -> bool {
        self.code == USER_VALIDATION_FAILED_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_connectivity_phrases() {
        assert!(is_connectivity_failure("Connection refused"));
        assert!(is_connectivity_failure(
            "error sending request: tcp connect error: Connection refused (os error 111)"
        ));
        assert!(is_connectivity_failure("dial tcp: no such host"));
        assert!(!is_connectivity_failure("bogus error"));
        assert!(!is_connectivity_failure("wallet already exists"));
    }

    #[test]
    fn user_validation_code_is_reserved() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"code": "user validation failed", "error": "silly error"}"#)
                .unwrap();
        assert!(body.is_user_validation_failure());

        let body: ErrorResponse =
            serde_json::from_str(r#"{"error": "wallet already exists"}"#).unwrap();
        assert!(!body.is_user_validation_failure());
    }

    #[test]
    fn predicates_match_variants() {
        let err = Error::ServiceUnavailable { resource: "wallet" };
        assert!(err.is_unavailable());
        assert!(!err.is_user_validation_failed());
        assert_eq!(err.to_string(), "wallet service not available");

        let err = Error::UserValidationFailed {
            message: "silly error".to_string(),
        };
        assert!(err.is_user_validation_failed());
        assert_eq!(err.to_string(), "silly error");

        let err = Error::Http {
            status: 400,
            message: "wallet already exists".to_string(),
        };
        assert_eq!(err.to_string(), "wallet already exists");

        let err = Error::MalformedResponse {
            status: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), r#"received http response:  - code "Not Found""#);
    }
}
