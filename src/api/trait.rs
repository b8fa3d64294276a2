//! WeCom API trait and context
//!
//! Provides the base trait and context for all WeCom API implementations.

use std::sync::Arc;

use crate::client::WecomClient;

/// Context holding shared resources for WeCom API implementations.
///
/// Only the HTTP client is shared. There is no token manager: the access
/// token is an argument of every call that needs one.
#[derive(Clone)]
pub struct WecomContext {
    pub(crate) client: Arc<WecomClient>,
}

impl std::fmt::Debug for WecomContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WecomContext")
            .field("client", &self.client)
            .finish()
    }
}

impl WecomContext {
    pub fn new(client: Arc<WecomClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the WeCom HTTP client.
    pub fn client(&self) -> &WecomClient {
        &self.client
    }
}

/// Trait for WeCom API implementations.
pub trait WecomApi: Send + Sync {
    /// Get a reference to the WeCom context
    fn context(&self) -> &WecomContext;

    /// Name of this API, used as the log target suffix.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
