//! Unified WeCom SDK client

use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::api::auth::{AccessTokenResponse, AuthApi};
use crate::api::media::{MediaApi, MediaType, MediaUploadResponse};
use crate::api::message::{MediaRef, MessageApi, SendReceipt};
use crate::api::WecomContext;
use crate::client::WecomClient;
use crate::error::WecomError;
use crate::types::{AccessToken, AgentId, CorpId, CorpSecret};

/// Unified WeCom client
///
/// This is the main entry point for the SDK. It is stateless apart from the
/// HTTP connection pool, so clones are cheap and calls may run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use wecom_sdk::Wecom;
/// use wecom_sdk::types::{AgentId, CorpId, CorpSecret};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let wecom = Wecom::builder().build()?;
///
///     let token = wecom
///         .acquire_token(&CorpId::new("ww123")?, &CorpSecret::new("secret")?)
///         .await?;
///     wecom
///         .send_text(&token.access_token, &AgentId::new("1000002")?, "alice", "hello")
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Wecom {
    context: Arc<WecomContext>,
}

impl std::fmt::Debug for Wecom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wecom")
            .field("context", &self.context)
            .finish()
    }
}

impl Wecom {
    pub fn builder() -> super::builder::WecomBuilder {
        super::builder::WecomBuilder::default()
    }

    pub fn client(&self) -> &WecomClient {
        self.context.client()
    }

    pub fn context(&self) -> Arc<WecomContext> {
        self.context.clone()
    }

    // Access token

    pub async fn acquire_token(
        &self,
        corp_id: &CorpId,
        corp_secret: &CorpSecret,
    ) -> Result<AccessTokenResponse, WecomError> {
        AuthApi::new(self.context.clone())
            .acquire_token(corp_id, corp_secret)
            .await
    }

    // Message API

    pub async fn send_text(
        &self,
        access_token: &AccessToken,
        agent_id: &AgentId,
        recipient: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<SendReceipt, WecomError> {
        MessageApi::new(self.context.clone())
            .send_text(access_token, agent_id, recipient, content)
            .await
    }

    pub async fn send_media(
        &self,
        access_token: &AccessToken,
        agent_id: &AgentId,
        recipient: &str,
        media: &MediaRef,
    ) -> Result<SendReceipt, WecomError> {
        MessageApi::new(self.context.clone())
            .send_media(access_token, agent_id, recipient, media)
            .await
    }

    // Media API

    pub async fn upload_media<R>(
        &self,
        access_token: &AccessToken,
        stream: R,
        filename: &str,
        media_type: MediaType,
    ) -> Result<MediaUploadResponse, WecomError>
    where
        R: AsyncRead + Unpin,
    {
        MediaApi::new(self.context.clone())
            .upload_media(access_token, stream, filename, media_type)
            .await
    }

    pub async fn upload_media_bytes(
        &self,
        access_token: &AccessToken,
        data: impl Into<Vec<u8>>,
        filename: &str,
        media_type: MediaType,
    ) -> Result<MediaUploadResponse, WecomError> {
        MediaApi::new(self.context.clone())
            .upload_media_bytes(access_token, data, filename, media_type)
            .await
    }
}

impl From<Arc<WecomContext>> for Wecom {
    fn from(context: Arc<WecomContext>) -> Self {
        Self { context }
    }
}
