use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
};

use crate::error::Result;

/// An access credential for the messaging network.
///
/// Wraps the raw token so it cannot leak through `Debug` or logging; the
/// single legitimate use site is handing it to the message transport.
#[derive(Clone)]
pub struct Credential(Secret<String>);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    /// Expose the raw token for an outbound call.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

/// Read-only integration state persisted by the surrounding platform.
///
/// Written by the out-of-scope setup/OAuth flow; this layer only reads it.
#[async_trait]
pub trait IntegrationState: Send + Sync {
    /// The default sender phone number id, if one was provisioned.
    async fn default_phone_number_id(&self) -> Result<Option<String>>;

    /// The access token for the network's API.
    async fn access_token(&self) -> Result<Credential>;
}
