use std::collections::BTreeMap;

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

use crate::error::Result;

/// A persisted conversation thread between a sender identity and a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    /// Channel-specific routing tags recorded at creation time.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Conversation {
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Persistent storage for conversation threads.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Find the conversation for a `(sender, recipient)` pair, creating it
    /// with `tags` on first contact.
    ///
    /// Must be idempotent: repeated calls with the same pair return the same
    /// conversation, including under concurrent callers.
    async fn get_or_create(
        &self,
        phone_number_id: &str,
        user_phone: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<Conversation>;

    /// Look up an existing conversation by id.
    async fn get(&self, conversation_id: &str) -> Result<Option<Conversation>>;
}
