//! Conversation resolution.

use std::collections::BTreeMap;

use tracing::debug;

use missive_channels::{Conversation, ConversationStore, Error, Result};

use crate::config::{TAG_PHONE_NUMBER_ID, TAG_USER_PHONE};

#[cfg(feature = "metrics")]
use missive_metrics::{counter, whatsapp as whatsapp_metrics};

/// Find or create the conversation for a `(sender, user)` pair.
///
/// No caching here: every action call re-resolves, and the store's
/// idempotent-create guarantee handles two actions racing on the same pair.
pub async fn resolve_conversation(
    store: &dyn ConversationStore,
    phone_number_id: &str,
    user_phone: &str,
) -> Result<Conversation> {
    let tags = BTreeMap::from([
        (TAG_PHONE_NUMBER_ID.to_string(), phone_number_id.to_string()),
        (TAG_USER_PHONE.to_string(), user_phone.to_string()),
    ]);
    let conversation = store.get_or_create(phone_number_id, user_phone, &tags).await?;
    debug!(
        conversation_id = %conversation.id,
        phone_number_id, user_phone, "conversation resolved"
    );
    #[cfg(feature = "metrics")]
    counter!(whatsapp_metrics::CONVERSATIONS_RESOLVED_TOTAL).increment(1);
    Ok(conversation)
}

/// Look up an existing conversation by id.
pub async fn lookup_conversation(
    store: &dyn ConversationStore,
    conversation_id: &str,
) -> Result<Conversation> {
    store
        .get(conversation_id)
        .await?
        .ok_or_else(|| Error::validation(format!("unknown conversation: {conversation_id}")))
}

/// Sender phone number id recorded on a conversation at creation time.
pub fn sender_of(conversation: &Conversation) -> Result<&str> {
    conversation.tag(TAG_PHONE_NUMBER_ID).ok_or_else(|| {
        Error::configuration(format!(
            "conversation {} carries no sender phone number id tag",
            conversation.id
        ))
    })
}

/// User phone recorded on a conversation at creation time.
pub fn user_of(conversation: &Conversation) -> Result<&str> {
    conversation.tag(TAG_USER_PHONE).ok_or_else(|| {
        Error::configuration(format!(
            "conversation {} carries no user phone tag",
            conversation.id
        ))
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, missive_channels::testkit::MemoryConversationStore};

    #[tokio::test]
    async fn resolution_is_idempotent_per_pair() {
        let store = MemoryConversationStore::new();
        let first = resolve_conversation(&store, "123", "15550001111")
            .await
            .unwrap();
        let second = resolve_conversation(&store, "123", "15550001111")
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn resolution_records_identity_tags() {
        let store = MemoryConversationStore::new();
        let conversation = resolve_conversation(&store, "123", "15550001111")
            .await
            .unwrap();
        assert_eq!(sender_of(&conversation).unwrap(), "123");
        assert_eq!(user_of(&conversation).unwrap(), "15550001111");
    }

    #[tokio::test]
    async fn lookup_of_unknown_conversation_is_a_validation_error() {
        let store = MemoryConversationStore::new();
        let err = lookup_conversation(&store, "conv-404").await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("conv-404"));
    }

    #[tokio::test]
    async fn untagged_conversation_is_a_configuration_error() {
        let conversation = Conversation {
            id: "conv-1".into(),
            tags: BTreeMap::new(),
        };
        assert!(matches!(
            sender_of(&conversation).unwrap_err(),
            Error::Configuration { .. }
        ));
        assert!(matches!(
            user_of(&conversation).unwrap_err(),
            Error::Configuration { .. }
        ));
    }
}
