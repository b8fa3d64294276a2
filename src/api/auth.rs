//! WeCom Access Token API
//!
//! Exchanges a corporation id and application secret for an access token.
//!
//! The token is handed back to the caller as-is. Nothing is cached and no
//! refresh is scheduled; call [`AuthApi::acquire_token`] again once
//! `expires_in` has elapsed.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

use crate::api::common::impl_wecom_api_response;
use crate::api::r#trait::{WecomApi, WecomContext};
use crate::error::WecomError;
use crate::types::{AccessToken, CorpId, CorpSecret};

#[derive(Debug, Deserialize)]
struct TokenWireResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: u64,
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

impl_wecom_api_response!(TokenWireResponse);

/// Access token returned by `/cgi-bin/gettoken`
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenResponse {
    pub access_token: AccessToken,
    /// Lifetime in seconds, as reported by WeCom (usually 7200)
    pub expires_in: u64,
}

impl AccessTokenResponse {
    pub fn expires_in_duration(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }
}

impl TryFrom<TokenWireResponse> for AccessTokenResponse {
    type Error = WecomError;

    fn try_from(wire: TokenWireResponse) -> Result<Self, Self::Error> {
        let access_token = AccessToken::new(wire.access_token)
            .map_err(|_| WecomError::Decode("response carries no access_token".to_string()))?;
        Ok(Self {
            access_token,
            expires_in: wire.expires_in,
        })
    }
}

/// WeCom access token API
pub struct AuthApi {
    context: Arc<WecomContext>,
}

impl AuthApi {
    pub fn new(context: Arc<WecomContext>) -> Self {
        Self { context }
    }

    /// Acquire an access token
    ///
    /// GET /cgi-bin/gettoken?corpid=CORPID&corpsecret=SECRET
    ///
    /// # Errors
    /// - `WecomError::Transport` if the request cannot be sent
    /// - `WecomError::HttpStatus` if the status is not 200
    /// - `WecomError::Decode` if the body is malformed or has no token
    /// - `WecomError::Api` if `errcode != 0`
    pub async fn acquire_token(
        &self,
        corp_id: &CorpId,
        corp_secret: &CorpSecret,
    ) -> Result<AccessTokenResponse, WecomError> {
        debug!(
            "[Wecom:{}] acquiring access token for corp {}",
            self.api_name(),
            corp_id.as_str()
        );

        let query = [
            ("corpid", corp_id.as_str()),
            ("corpsecret", corp_secret.as_str()),
        ];
        let wire: TokenWireResponse = self.context.client.get("/cgi-bin/gettoken", &query).await?;
        let response = AccessTokenResponse::try_from(wire)?;

        info!(
            "[Wecom:{}] access token acquired (expires in {}s)",
            self.api_name(),
            response.expires_in
        );
        Ok(response)
    }
}

impl WecomApi for AuthApi {
    fn context(&self) -> &WecomContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "auth"
    }
}
