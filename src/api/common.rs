//! Common API response primitives
//!
//! Every WeCom endpoint answers with a JSON object carrying `errcode` and
//! `errmsg`. Either field may be missing from a success body, so both default
//! (`0` and `""`).
//!
//! ## Usage
//!
//! ```rust
//! use wecom_sdk::api::common::{ApiResponseBase, WecomApiResponse};
//!
//! let json = r#"{"errcode": 0, "errmsg": "ok"}"#;
//! let resp: ApiResponseBase = serde_json::from_str(json).unwrap();
//! assert!(resp.check().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::WecomError;

/// Trait for WeCom API responses that carry `errcode` / `errmsg`.
///
/// [`WecomClient`](crate::client::WecomClient) decodes the body into the
/// response type and then calls [`check`](WecomApiResponse::check).
pub trait WecomApiResponse {
    /// Returns the error code from the API response.
    ///
    /// `0` indicates success; any other value is an error.
    fn errcode(&self) -> i64;

    /// Returns the error message from the API response.
    fn errmsg(&self) -> &str;

    /// Returns `Ok(())` when `errcode == 0`, otherwise `WecomError::Api`.
    fn check(&self) -> Result<(), WecomError> {
        WecomError::check_api(self.errcode(), self.errmsg())
    }

    fn is_success(&self) -> bool {
        self.errcode() == 0
    }
}

/// Minimal API response carrying only `errcode` and `errmsg`.
///
/// ```rust
/// use wecom_sdk::api::common::{ApiResponseBase, WecomApiResponse};
///
/// let json = r#"{"errcode": 40013, "errmsg": "invalid corpid"}"#;
/// let resp: ApiResponseBase = serde_json::from_str(json).unwrap();
/// assert!(!resp.is_success());
/// assert!(resp.check().is_err());
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiResponseBase {
    /// Error code (`0` = success)
    #[serde(default)]
    pub errcode: i64,
    /// Error message
    #[serde(default)]
    pub errmsg: String,
}

impl ApiResponseBase {
    pub fn success() -> Self {
        Self {
            errcode: 0,
            errmsg: "ok".to_string(),
        }
    }

    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self {
            errcode: code,
            errmsg: message.into(),
        }
    }
}

impl WecomApiResponse for ApiResponseBase {
    fn errcode(&self) -> i64 {
        self.errcode
    }

    fn errmsg(&self) -> &str {
        &self.errmsg
    }
}

/// Implements [`WecomApiResponse`] for a struct with `errcode`/`errmsg` fields.
macro_rules! impl_wecom_api_response {
    ($ty:ty) => {
        impl $crate::api::common::WecomApiResponse for $ty {
            fn errcode(&self) -> i64 {
                self.errcode
            }

            fn errmsg(&self) -> &str {
                &self.errmsg
            }
        }
    };
}

pub(crate) use impl_wecom_api_response;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_base_success() {
        let resp = ApiResponseBase::success();
        assert!(resp.is_success());
        assert!(resp.check().is_ok());
    }

    #[test]
    fn test_api_response_base_error() {
        let resp = ApiResponseBase::error(40014, "invalid access_token");
        assert!(!resp.is_success());
        match resp.check() {
            Err(WecomError::Api { code, message }) => {
                assert_eq!(code, 40014);
                assert_eq!(message, "invalid access_token");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_response_base_defaults_on_missing_fields() {
        let resp: ApiResponseBase = serde_json::from_str(r#"{"media_id": "m1"}"#).unwrap();
        assert_eq!(resp.errcode, 0);
        assert_eq!(resp.errmsg, "");
        assert!(resp.check().is_ok());
    }

    #[test]
    fn test_api_response_base_negative_code() {
        let resp: ApiResponseBase =
            serde_json::from_str(r#"{"errcode": -1, "errmsg": "system busy"}"#).unwrap();
        assert!(!resp.is_success());
        assert!(resp.check().unwrap_err().is_transient());
    }

    #[test]
    fn test_api_response_base_rejects_wrong_type() {
        let result = serde_json::from_str::<ApiResponseBase>(r#"{"errcode": "zero"}"#);
        assert!(result.is_err());
    }
}
