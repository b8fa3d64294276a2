//! WeCom API modules
//!
//! - [`common`] - Shared `errcode`/`errmsg` response primitives
//! - [`auth`] - Access token acquisition
//! - [`message`] - Text and media application messages
//! - [`media`] - Temporary media upload
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wecom_sdk::api::{MessageApi, WecomContext};
//! ```

pub mod auth;
pub mod common;
pub mod media;
pub mod message;
pub mod r#trait;

pub use auth::{AccessTokenResponse, AuthApi};
pub use common::{ApiResponseBase, WecomApiResponse};
pub use media::{MediaApi, MediaType, MediaUploadResponse};
pub use message::{MediaRef, MessageApi, SendReceipt};
pub use r#trait::{WecomApi, WecomContext};
