//! Temporary Media Upload API
//!
//! Uploads a file to WeCom and returns the media id that
//! [`MessageApi::send_media`](crate::api::message::MessageApi::send_media)
//! refers to. Uploaded media stays valid for 3 days.
//!
//! ## Supported Media Types
//!
//! - Image (`image`)
//! - Voice (`voice`)
//! - Video (`video`)
//! - File (`file`)
//!
//! ## Example
//!
//! ```ignore
//! use wecom_sdk::api::media::{MediaApi, MediaType};
//!
//! let file = tokio::fs::File::open("/var/reports/daily.pdf").await?;
//! let uploaded = media_api
//!     .upload_media(&token, file, "/var/reports/daily.pdf", MediaType::File)
//!     .await?;
//! println!("Media ID: {}", uploaded.media_id.as_str());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::api::common::impl_wecom_api_response;
use crate::api::r#trait::{WecomApi, WecomContext};
use crate::error::WecomError;
use crate::types::{AccessToken, MediaId};

const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Media type accepted by the upload and send endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Image file (jpg, png)
    Image,
    /// Voice file (amr)
    Voice,
    /// Video file (mp4)
    Video,
    /// Any other file
    File,
}

impl MediaType {
    /// Get the string representation of the media type
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Voice => "voice",
            MediaType::Video => "video",
            MediaType::File => "file",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = WecomError;

    /// Parses a media type tag.
    ///
    /// Any tag outside `image`, `voice`, `video`, `file` is rejected with
    /// `WecomError::InvalidArgument("invalid type")`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "voice" => Ok(MediaType::Voice),
            "video" => Ok(MediaType::Video),
            "file" => Ok(MediaType::File),
            _ => Err(WecomError::InvalidArgument("invalid type".to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadWireResponse {
    #[serde(default, rename = "type")]
    media_type: String,
    #[serde(default)]
    media_id: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

impl_wecom_api_response!(UploadWireResponse);

/// Response from `/cgi-bin/media/upload`
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUploadResponse {
    /// Identifier to pass to `send_media`
    pub media_id: MediaId,
    /// Type echoed by WeCom
    pub media_type: String,
    /// Upload time as the unix-seconds string WeCom returns
    pub created_at: String,
}

impl TryFrom<UploadWireResponse> for MediaUploadResponse {
    type Error = WecomError;

    fn try_from(wire: UploadWireResponse) -> Result<Self, Self::Error> {
        let media_id = MediaId::new(wire.media_id)
            .map_err(|_| WecomError::Decode("response carries no media_id".to_string()))?;
        Ok(Self {
            media_id,
            media_type: wire.media_type,
            created_at: wire.created_at,
        })
    }
}

/// Keep only the last path component of `filename`.
///
/// `"/tmp/dir/photo.jpg"` becomes `"photo.jpg"`. A name ending in a
/// separator yields `""`.
pub(crate) fn base_name(filename: &str) -> &str {
    filename
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(filename)
}

/// Temporary Media API
pub struct MediaApi {
    context: Arc<WecomContext>,
}

impl MediaApi {
    pub fn new(context: Arc<WecomContext>) -> Self {
        Self { context }
    }

    /// Upload temporary media from a byte stream
    ///
    /// POST /cgi-bin/media/upload?access_token=ACCESS_TOKEN&type=TYPE
    ///
    /// The stream is sent as the single multipart part `media`, with content
    /// type `application/octet-stream`. Only the base name of `filename` is
    /// transmitted.
    ///
    /// # Errors
    /// - `WecomError::Transport` if reading `stream` or the request fails
    /// - `WecomError::HttpStatus` if the status is not 200
    /// - `WecomError::Decode` if the body is malformed or has no media id
    /// - `WecomError::Api` if `errcode != 0`
    pub async fn upload_media<R>(
        &self,
        access_token: &AccessToken,
        mut stream: R,
        filename: &str,
        media_type: MediaType,
    ) -> Result<MediaUploadResponse, WecomError>
    where
        R: AsyncRead + Unpin,
    {
        let mut data = Vec::new();
        stream.read_to_end(&mut data).await?;

        self.upload_media_bytes(access_token, data, filename, media_type)
            .await
    }

    /// Upload temporary media already held in memory
    ///
    /// Same request and errors as [`upload_media`](Self::upload_media).
    pub async fn upload_media_bytes(
        &self,
        access_token: &AccessToken,
        data: impl Into<Vec<u8>>,
        filename: &str,
        media_type: MediaType,
    ) -> Result<MediaUploadResponse, WecomError> {
        let data = data.into();
        let name = base_name(filename).to_string();
        debug!(
            "[Wecom:{}] uploading {} ({} bytes) as {}",
            self.api_name(),
            name,
            data.len(),
            media_type
        );

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(name)
            .mime_str(UPLOAD_CONTENT_TYPE)?;
        let form = reqwest::multipart::Form::new().part("media", part);

        let query = [
            ("access_token", access_token.as_str()),
            ("type", media_type.as_str()),
        ];
        let wire: UploadWireResponse = self
            .context
            .client
            .post_multipart("/cgi-bin/media/upload", &query, form)
            .await?;
        let response = MediaUploadResponse::try_from(wire)?;

        info!(
            "[Wecom:{}] uploaded {} media {}",
            self.api_name(),
            media_type,
            response.media_id.as_str()
        );
        Ok(response)
    }
}

impl WecomApi for MediaApi {
    fn api_name(&self) -> &'static str {
        "media"
    }

    fn context(&self) -> &WecomContext {
        &self.context
    }
}
