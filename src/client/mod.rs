//! WeCom HTTP Client module
//!
//! This module contains the low-level [`WecomClient`] and the [`Wecom`] facade.

mod wecom_client;
pub use wecom_client::{WecomClient, WecomClientBuilder};

mod wecom;
pub use wecom::Wecom;

mod builder;
pub use builder::WecomBuilder;
