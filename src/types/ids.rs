use serde::{Deserialize, Serialize};

macro_rules! non_empty_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, String> {
                let value = value.into();
                if value.is_empty() {
                    return Err(concat!($label, " must not be empty").to_string());
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

non_empty_id!(
    /// WeCom corporation id (`corpid`)
    CorpId,
    "CorpId"
);

non_empty_id!(
    /// Secret of a WeCom application (`corpsecret`)
    CorpSecret,
    "CorpSecret"
);

non_empty_id!(
    /// Id of the registered application sending the message (`agentid`)
    AgentId,
    "AgentId"
);

non_empty_id!(
    /// Access token returned by `/cgi-bin/gettoken`
    AccessToken,
    "AccessToken"
);

non_empty_id!(
    /// Media id returned by `/cgi-bin/media/upload`
    MediaId,
    "MediaId"
);

impl std::fmt::Debug for CorpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CorpId").field(&self.0).finish()
    }
}

impl std::fmt::Debug for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AgentId").field(&self.0).finish()
    }
}

impl std::fmt::Debug for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MediaId").field(&self.0).finish()
    }
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for CorpSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CorpSecret(..)")
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}
