//! Error types
//!
//! Every failure is reported as a [`WecomError`]. The variant tells which stage
//! of the call failed:
//!
//! | Stage                         | Variant                          |
//! |-------------------------------|----------------------------------|
//! | building / sending / reading  | [`WecomError::Transport`]        |
//! | HTTP status other than 200    | [`WecomError::HttpStatus`]       |
//! | body is not the expected JSON | [`WecomError::Decode`]           |
//! | `errcode != 0` in the body    | [`WecomError::Api`]              |
//! | unsupported caller input      | [`WecomError::InvalidArgument`]  |
//! | client misconfiguration       | [`WecomError::Config`]           |

use http::StatusCode;
use thiserror::Error;

/// Network-level failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to read media stream: {0}")]
    Read(#[from] std::io::Error),
}

impl TransportError {
    /// Returns `true` when the failure was caused by the per-call timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            TransportError::Read(e) => e.kind() == std::io::ErrorKind::TimedOut,
        }
    }
}

/// WeCom SDK error types
#[derive(Debug, Error)]
pub enum WecomError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: StatusCode },

    #[error("response decode error: {0}")]
    Decode(String),

    #[error("WeCom API error (code={code}): {message}")]
    Api { code: i64, message: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WecomError {
    /// Map a WeCom `errcode`/`errmsg` pair to a result.
    ///
    /// `errmsg` is carried verbatim.
    pub fn check_api(errcode: i64, errmsg: &str) -> Result<(), WecomError> {
        if errcode == 0 {
            Ok(())
        } else {
            Err(WecomError::Api {
                code: errcode,
                message: errmsg.to_string(),
            })
        }
    }

    /// Whether a caller-side retry has a reasonable chance of succeeding.
    ///
    /// The client itself never retries. Transport failures, 5xx statuses and
    /// the `-1` (system busy) API code are classed as transient.
    pub fn is_transient(&self) -> bool {
        match self {
            WecomError::Transport(_) => true,
            WecomError::HttpStatus { status } => status.is_server_error(),
            WecomError::Api { code, .. } => *code == -1,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for WecomError {
    fn from(e: reqwest::Error) -> Self {
        WecomError::Transport(TransportError::Request(e))
    }
}

impl From<std::io::Error> for WecomError {
    fn from(e: std::io::Error) -> Self {
        WecomError::Transport(TransportError::Read(e))
    }
}

impl From<serde_json::Error> for WecomError {
    fn from(e: serde_json::Error) -> Self {
        WecomError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_api_success() {
        assert!(WecomError::check_api(0, "ok").is_ok());
    }

    #[test]
    fn test_check_api_error_keeps_message() {
        let err = WecomError::check_api(40014, "invalid access_token").unwrap_err();
        match err {
            WecomError::Api { code, message } => {
                assert_eq!(code, 40014);
                assert_eq!(message, "invalid access_token");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_transient() {
        let busy = WecomError::Api {
            code: -1,
            message: "system busy".to_string(),
        };
        assert!(busy.is_transient());

        let bad_gateway = WecomError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(bad_gateway.is_transient());

        let not_found = WecomError::HttpStatus {
            status: StatusCode::NOT_FOUND,
        };
        assert!(!not_found.is_transient());

        let io = WecomError::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "eof",
        ));
        assert!(io.is_transient());

        assert!(!WecomError::InvalidArgument("invalid type".into()).is_transient());
        assert!(!WecomError::Decode("bad".into()).is_transient());
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(WecomError::from(err), WecomError::Decode(_)));
    }

    #[test]
    fn test_display() {
        let err = WecomError::Api {
            code: 81013,
            message: "user & party & tag all invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "WeCom API error (code=81013): user & party & tag all invalid"
        );

        let err = WecomError::HttpStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.to_string(), "unexpected HTTP status: 503 Service Unavailable");
    }
}
