use {async_trait::async_trait, serde::Deserialize};

use crate::{error::Result, state::Credential};

/// Result of a single outbound send as reported by the network.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResponse {
    /// Provider-assigned id of the accepted message.
    #[serde(default)]
    pub message_id: Option<String>,

    /// Raw error value returned by the network when the send was rejected.
    /// Absence of this field means success; delivery-status details are not
    /// inspected at this layer.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl SendResponse {
    #[must_use]
    pub fn accepted(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn rejected(error: serde_json::Value) -> Self {
        Self {
            message_id: None,
            error: Some(error),
        }
    }
}

/// Low-level message transport for a channel.
///
/// `body` is the channel-specific message fragment; the implementation owns
/// endpoint construction, the recipient envelope, and authentication with
/// the supplied credential. No retries happen behind this trait.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn send_message(
        &self,
        credential: &Credential,
        phone_number_id: &str,
        to: &str,
        body: serde_json::Value,
    ) -> Result<SendResponse>;
}
