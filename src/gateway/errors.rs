use thiserror::Error;

/// Failures surfaced by a [`CommentGateway`](super::CommentGateway).
///
/// The `Display` text is what the controller stores as its `error` message,
/// so `RequestFailed` renders the bare reason phrase of the response status.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{status_text}")]
    RequestFailed { status: u16, status_text: String },

    #[error("Empty API response")]
    EmptyResponse,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn request_failed(status: u16, status_text: impl AsRef<str>) -> Self {
        GatewayError::RequestFailed {
            status,
            status_text: status_text.as_ref().to_string(),
        }
    }

    pub fn from_status(status: reqwest::StatusCode) -> Self {
        let text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        GatewayError::RequestFailed {
            status: status.as_u16(),
            status_text: text,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message_is_reason_phrase() {
        let err = GatewayError::from_status(reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad Request");
        assert!(matches!(err, GatewayError::RequestFailed { status: 400, .. }));
    }

    #[test]
    fn test_unknown_status_falls_back_to_code() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(GatewayError::from_status(status).to_string(), "599");
    }

    #[test]
    fn test_empty_response_message() {
        assert_eq!(GatewayError::EmptyResponse.to_string(), "Empty API response");
    }
}
