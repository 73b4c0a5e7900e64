use error_common::LmsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Backend error: HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for LmsError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(e) if e.is_timeout() => {
                LmsError::Network(format!("request timed out: {e}"))
            }
            ClientError::Network(e) => LmsError::Network(e.to_string()),
            ClientError::Unauthorized(msg) => LmsError::Unauthorized(msg),
            ClientError::Backend { status, message } => {
                LmsError::Backend(format!("HTTP {status}: {message}"))
            }
            ClientError::MalformedResponse(msg) => LmsError::Serialization(msg),
            ClientError::Serialization(e) => LmsError::Serialization(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_distinct_variant() {
        let err: LmsError = ClientError::Unauthorized("token rejected".into()).into();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_backend_error_keeps_status() {
        let err: LmsError = ClientError::Backend {
            status: 500,
            message: "internal".into(),
        }
        .into();
        match err {
            LmsError::Backend(msg) => assert!(msg.contains("500")),
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_response_maps_to_serialization() {
        let err: LmsError = ClientError::MalformedResponse("missing data".into()).into();
        assert!(matches!(err, LmsError::Serialization(_)));
    }
}
