//! Middleware components for the WeCom SDK.
//!
//! Middleware wraps the HTTP transport of [`WecomClient`](crate::client::WecomClient)
//! using Tower patterns and is installed with
//! [`WecomBuilder::with_middleware`](crate::client::WecomBuilder::with_middleware).
//!
//! ## Middleware Types
//!
//! - [`LoggingMiddleware`] - Logs request/response information with secrets redacted
//!
//! ## Usage
//!
//! ```ignore
//! use wecom_sdk::{middleware::LoggingMiddleware, Wecom};
//!
//! let wecom = Wecom::builder()
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
