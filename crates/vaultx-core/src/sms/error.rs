use std::fmt;

use serde_json::Value;

/// Failure of a send or verify request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Rejected locally; no request was made.
    Validation(String),
    /// The backend answered with a failure.
    Service {
        status: u16,
        /// Server-provided `detail`, when the body carried one.
        detail: Option<String>,
    },
    /// The request could not complete.
    Transport(String),
}

impl VerificationError {
    /// Builds a service error from a non-2xx response body.
    ///
    /// FastAPI-style bodies carry `{"detail": "..."}`; a non-string `detail`
    /// (validation error lists) is ignored.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("detail").and_then(Value::as_str).map(str::to_string))
            .filter(|d| !d.trim().is_empty());
        Self::Service { status, detail }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("Request timed out: {err}"))
        } else if err.is_connect() {
            Self::Transport(format!("Connection failed: {err}"))
        } else {
            Self::Transport(format!("Network error: {err}"))
        }
    }

    /// Message shown to the user.
    ///
    /// `fallback` is used for service errors without a `detail`; `generic`
    /// for transport failures.
    pub fn user_message(&self, fallback: &str, generic: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Service { detail: None, .. } => fallback.to_string(),
            Self::Transport(_) => generic.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::Service {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {status}: {detail}"),
            Self::Service {
                status,
                detail: None,
            } => write!(f, "HTTP {status}"),
            Self::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for VerificationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_extracted() {
        let err = VerificationError::from_response(400, r#"{"detail":"Invalid phone number"}"#);
        assert_eq!(
            err,
            VerificationError::Service {
                status: 400,
                detail: Some("Invalid phone number".to_string())
            }
        );
        assert_eq!(err.user_message("fallback", "generic"), "Invalid phone number");
        assert_eq!(err.to_string(), "HTTP 400: Invalid phone number");
    }

    #[test]
    fn test_missing_detail_uses_fallback() {
        let err = VerificationError::from_response(500, "Internal Server Error");
        assert_eq!(err.user_message("fallback", "generic"), "fallback");
    }

    #[test]
    fn test_structured_detail_is_ignored() {
        let err = VerificationError::from_response(422, r#"{"detail":[{"msg":"field required"}]}"#);
        assert_eq!(
            err,
            VerificationError::Service {
                status: 422,
                detail: None
            }
        );
    }

    #[test]
    fn test_transport_uses_generic_message() {
        let err = VerificationError::Transport("Connection failed".to_string());
        assert_eq!(err.user_message("fallback", "generic"), "generic");
    }
}
