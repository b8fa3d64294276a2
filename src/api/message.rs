//! Application Message API
//!
//! Sends text and media messages through `/cgi-bin/message/send`.
//!
//! Every message is sent with duplicate checking disabled
//! (`enable_duplicate_check: 0`). The 1800 second interval is still part of
//! the request body.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::common::impl_wecom_api_response;
use crate::api::media::MediaType;
use crate::api::r#trait::{WecomApi, WecomContext};
use crate::error::WecomError;
use crate::types::{AccessToken, AgentId, MediaId};

const SEND_PATH: &str = "/cgi-bin/message/send";
const DUPLICATE_CHECK_DISABLED: u8 = 0;
const DUPLICATE_CHECK_INTERVAL_SECS: u32 = 1800;

/// A previously uploaded media file to send as a message
///
/// ```rust
/// use wecom_sdk::api::message::MediaRef;
/// use wecom_sdk::types::MediaId;
///
/// let media = MediaRef::video(MediaId::new("m1").unwrap())
///     .with_title("Weekly sync")
///     .with_description("Recording");
/// assert_eq!(media.title(), "Weekly sync");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    media_type: MediaType,
    media_id: MediaId,
    title: String,
    description: String,
}

impl MediaRef {
    pub fn new(media_type: MediaType, media_id: MediaId) -> Self {
        Self {
            media_type,
            media_id,
            title: String::new(),
            description: String::new(),
        }
    }

    /// Build a reference from a raw media type tag.
    ///
    /// Fails with `WecomError::InvalidArgument("invalid type")` for tags
    /// outside `image`, `voice`, `video`, `file`.
    pub fn from_tag(tag: &str, media_id: MediaId) -> Result<Self, WecomError> {
        Ok(Self::new(tag.parse()?, media_id))
    }

    pub fn image(media_id: MediaId) -> Self {
        Self::new(MediaType::Image, media_id)
    }

    pub fn voice(media_id: MediaId) -> Self {
        Self::new(MediaType::Voice, media_id)
    }

    pub fn video(media_id: MediaId) -> Self {
        Self::new(MediaType::Video, media_id)
    }

    pub fn file(media_id: MediaId) -> Self {
        Self::new(MediaType::File, media_id)
    }

    /// Video title. Ignored for other media types.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Video description. Ignored for other media types.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn media_id(&self) -> &MediaId {
        &self.media_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    content: Cow<'a, str>,
}

#[derive(Debug, Serialize)]
struct MediaContent<'a> {
    media_id: &'a str,
}

#[derive(Debug, Serialize)]
struct VideoContent<'a> {
    media_id: &'a str,
    title: Cow<'a, str>,
    description: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "msgtype", rename_all = "lowercase")]
enum MessageContent<'a> {
    Text { text: TextContent<'a> },
    Image { image: MediaContent<'a> },
    Voice { voice: MediaContent<'a> },
    Video { video: VideoContent<'a> },
    File { file: MediaContent<'a> },
}

impl<'a> MessageContent<'a> {
    fn text(content: &'a [u8]) -> Self {
        MessageContent::Text {
            text: TextContent {
                content: String::from_utf8_lossy(content),
            },
        }
    }

    fn media(media: &'a MediaRef, now_unix: u64) -> Self {
        let media_id = media.media_id.as_str();
        match media.media_type {
            MediaType::Image => MessageContent::Image {
                image: MediaContent { media_id },
            },
            MediaType::Voice => MessageContent::Voice {
                voice: MediaContent { media_id },
            },
            MediaType::File => MessageContent::File {
                file: MediaContent { media_id },
            },
            MediaType::Video => MessageContent::Video {
                video: VideoContent {
                    media_id,
                    title: video_title(&media.title, now_unix),
                    description: &media.description,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    touser: &'a str,
    agentid: &'a str,
    #[serde(flatten)]
    content: MessageContent<'a>,
    enable_duplicate_check: u8,
    duplicate_check_interval: u32,
}

impl<'a> SendMessageRequest<'a> {
    fn new(recipient: &'a str, agent_id: &'a AgentId, content: MessageContent<'a>) -> Self {
        Self {
            touser: recipient,
            agentid: agent_id.as_str(),
            content,
            enable_duplicate_check: DUPLICATE_CHECK_DISABLED,
            duplicate_check_interval: DUPLICATE_CHECK_INTERVAL_SECS,
        }
    }
}

/// An empty video title becomes `Video_<unix seconds>`.
fn video_title(title: &str, now_unix: u64) -> Cow<'_, str> {
    if title.is_empty() {
        Cow::Owned(format!("Video_{now_unix}"))
    } else {
        Cow::Borrowed(title)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Result of a successful send
///
/// WeCom accepts a message even when some recipients are unknown; those are
/// listed here, `|`-separated.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub invaliduser: String,
    #[serde(default)]
    pub invalidparty: String,
    #[serde(default)]
    pub invalidtag: String,
    #[serde(default)]
    pub msgid: String,
    /// Only set for template-card messages
    #[serde(default)]
    pub response_code: String,
    #[serde(default)]
    pub(crate) errcode: i64,
    #[serde(default)]
    pub(crate) errmsg: String,
}

impl_wecom_api_response!(SendReceipt);

impl SendReceipt {
    /// Whether some recipients were rejected
    pub fn has_invalid_recipients(&self) -> bool {
        !self.invaliduser.is_empty() || !self.invalidparty.is_empty() || !self.invalidtag.is_empty()
    }
}

/// Application message API
pub struct MessageApi {
    context: Arc<WecomContext>,
}

impl MessageApi {
    pub fn new(context: Arc<WecomContext>) -> Self {
        Self { context }
    }

    /// Send a text message
    ///
    /// POST /cgi-bin/message/send?access_token=ACCESS_TOKEN
    ///
    /// # Arguments
    /// * `recipient` - `touser` value: a user id, `a|b|c`, or `@all`
    /// * `content` - Message text. Invalid UTF-8 is replaced with U+FFFD.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let receipt = message_api
    ///     .send_text(&token, &agent_id, "alice", "Build finished")
    ///     .await?;
    /// ```
    pub async fn send_text(
        &self,
        access_token: &AccessToken,
        agent_id: &AgentId,
        recipient: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<SendReceipt, WecomError> {
        let body = SendMessageRequest::new(
            recipient,
            agent_id,
            MessageContent::text(content.as_ref()),
        );
        self.send(access_token, &body).await
    }

    /// Send an image, voice, video or file message
    ///
    /// POST /cgi-bin/message/send?access_token=ACCESS_TOKEN
    ///
    /// For video, an empty title is replaced with `Video_<unix seconds>`.
    pub async fn send_media(
        &self,
        access_token: &AccessToken,
        agent_id: &AgentId,
        recipient: &str,
        media: &MediaRef,
    ) -> Result<SendReceipt, WecomError> {
        let body = SendMessageRequest::new(
            recipient,
            agent_id,
            MessageContent::media(media, unix_now()),
        );
        self.send(access_token, &body).await
    }

    async fn send(
        &self,
        access_token: &AccessToken,
        body: &SendMessageRequest<'_>,
    ) -> Result<SendReceipt, WecomError> {
        let msgtype = body.content.msgtype();
        debug!(
            "[Wecom:{}] sending {} message to {} via agent {}",
            self.api_name(),
            msgtype,
            body.touser,
            body.agentid
        );

        let query = [("access_token", access_token.as_str())];
        let receipt: SendReceipt = self.context.client.post(SEND_PATH, &query, body).await?;

        if receipt.has_invalid_recipients() {
            warn!(
                "[Wecom:{}] {} message partly rejected: invaliduser={:?} invalidparty={:?} invalidtag={:?}",
                self.api_name(),
                msgtype,
                receipt.invaliduser,
                receipt.invalidparty,
                receipt.invalidtag
            );
        } else {
            info!("[Wecom:{}] {} message sent", self.api_name(), msgtype);
        }
        Ok(receipt)
    }
}

impl MessageContent<'_> {
    fn msgtype(&self) -> &'static str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Image { .. } => "image",
            MessageContent::Voice { .. } => "voice",
            MessageContent::Video { .. } => "video",
            MessageContent::File { .. } => "file",
        }
    }
}

impl WecomApi for MessageApi {
    fn context(&self) -> &WecomContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "message"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn agent() -> AgentId {
        AgentId::new("1000002").unwrap()
    }

    fn media_id(id: &str) -> MediaId {
        MediaId::new(id).unwrap()
    }

    #[test]
    fn test_text_body_shape() {
        let agent = agent();
        let body = SendMessageRequest::new("alice", &agent, MessageContent::text(b"hello"));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "touser": "alice",
                "agentid": "1000002",
                "msgtype": "text",
                "text": {"content": "hello"},
                "enable_duplicate_check": 0,
                "duplicate_check_interval": 1800
            })
        );
    }

    #[test]
    fn test_text_invalid_utf8_is_replaced() {
        let agent = agent();
        let body = SendMessageRequest::new("bob", &agent, MessageContent::text(b"ok\xff"));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["text"]["content"], "ok\u{fffd}");
    }

    #[test]
    fn test_image_voice_file_bodies() {
        let agent = agent();
        for (media, field) in [
            (MediaRef::image(media_id("img")), "image"),
            (MediaRef::voice(media_id("img")), "voice"),
            (MediaRef::file(media_id("img")), "file"),
        ] {
            let body =
                SendMessageRequest::new("alice", &agent, MessageContent::media(&media, 0));
            let value = serde_json::to_value(&body).unwrap();

            assert_eq!(value["msgtype"], field);
            assert_eq!(value[field], json!({"media_id": "img"}));
            assert_eq!(value["enable_duplicate_check"], 0);
            assert_eq!(value["duplicate_check_interval"], 1800);
        }
    }

    #[test]
    fn test_file_message_ignores_title() {
        let agent = agent();
        let media = MediaRef::file(media_id("f1")).with_title("ignored");
        let body = SendMessageRequest::new("alice", &agent, MessageContent::media(&media, 0));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["file"], json!({"media_id": "f1"}));
    }

    #[test]
    fn test_video_empty_title_uses_timestamp() {
        let agent = agent();
        let media = MediaRef::video(media_id("v1"));
        let body = SendMessageRequest::new(
            "alice",
            &agent,
            MessageContent::media(&media, 1_700_000_000),
        );
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["msgtype"], "video");
        assert_eq!(
            value["video"],
            json!({
                "media_id": "v1",
                "title": "Video_1700000000",
                "description": ""
            })
        );
    }

    #[test]
    fn test_video_title_passes_through() {
        assert_eq!(video_title("Demo", 1), "Demo");
        assert_eq!(video_title("", 42), "Video_42");
    }

    #[test]
    fn test_media_ref_from_tag() {
        let media = MediaRef::from_tag("voice", media_id("v")).unwrap();
        assert_eq!(media.media_type(), MediaType::Voice);

        let result = MediaRef::from_tag("news", media_id("v"));
        assert!(matches!(result, Err(WecomError::InvalidArgument(_))));
    }

    #[test]
    fn test_receipt_invalid_recipients() {
        let receipt: SendReceipt = serde_json::from_str(
            r#"{"errcode": 0, "errmsg": "ok", "invaliduser": "ghost", "msgid": "xx"}"#,
        )
        .unwrap();
        assert!(receipt.has_invalid_recipients());
        assert_eq!(receipt.msgid, "xx");

        let receipt: SendReceipt = serde_json::from_str(r#"{"errcode": 0}"#).unwrap();
        assert!(!receipt.has_invalid_recipients());
    }
}
