//! WeCom (WeChat Work) SDK for Rust
//!
//! A thin, stateless client for sending WeCom application messages.
//!
//! ## API Coverage
//!
//! | Operation      | Endpoint                      |
//! |----------------|-------------------------------|
//! | Access token   | `GET  /cgi-bin/gettoken`      |
//! | Text message   | `POST /cgi-bin/message/send`  |
//! | Media message  | `POST /cgi-bin/message/send`  |
//! | Media upload   | `POST /cgi-bin/media/upload`  |
//!
//! The client keeps no token cache and never retries. Token lifetime and
//! retry policy belong to the caller; [`WecomError::is_transient`] helps
//! with the latter.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wecom_sdk::{Wecom, api::{MediaRef, MediaType}, types::{AgentId, CorpId, CorpSecret}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wecom = Wecom::builder().build()?;
//!     let agent = AgentId::new("1000002")?;
//!
//!     let token = wecom
//!         .acquire_token(&CorpId::new("ww1234567890abcdef")?, &CorpSecret::new("secret")?)
//!         .await?
//!         .access_token;
//!
//!     wecom.send_text(&token, &agent, "alice", "Deploy finished").await?;
//!
//!     let report = tokio::fs::File::open("/tmp/report.pdf").await?;
//!     let uploaded = wecom
//!         .upload_media(&token, report, "/tmp/report.pdf", MediaType::File)
//!         .await?;
//!     wecom
//!         .send_media(&token, &agent, "alice", &MediaRef::file(uploaded.media_id))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - WeCom API modules (auth, message, media)
//! - [`client`] - HTTP client and the [`Wecom`] facade
//! - [`config`] - Serializable client configuration
//! - [`error`] - Error types
//! - [`middleware`] - Tower middleware around the HTTP transport
//! - [`types`] - Typed identifiers
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wecom_sdk::WecomError;
//!
//! match result {
//!     Ok(receipt) => { /* handle success */ }
//!     Err(WecomError::Api { code, message }) => {
//!         eprintln!("API error: {} - {}", code, message);
//!     }
//!     Err(WecomError::HttpStatus { status }) => {
//!         eprintln!("HTTP status: {}", status);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod types;

pub use client::{Wecom, WecomBuilder, WecomClient, WecomClientBuilder};
pub use config::ClientConfig;
pub use error::{TransportError, WecomError};
