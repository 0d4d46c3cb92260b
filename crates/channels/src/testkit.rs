//! In-memory capability doubles for exercising action pipelines in tests.
//!
//! No persistence, no network. Each double records the calls it observes so
//! tests can assert what an action did and, just as importantly, what it
//! never did.

use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    client::{MessagingClient, SendResponse},
    error::Result,
    log::OperatorLog,
    state::{Credential, IntegrationState},
    store::{Conversation, ConversationStore},
};

/// In-memory conversation store keyed by the `(sender, recipient)` pair.
pub struct MemoryConversationStore {
    conversations: Mutex<HashMap<(String, String), Conversation>>,
    next_id: AtomicU64,
    resolve_calls: AtomicUsize,
}

impl MemoryConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            resolve_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `get_or_create` calls observed.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of conversations currently stored.
    pub fn len(&self) -> usize {
        let conversations = self.conversations.lock().unwrap_or_else(|e| e.into_inner());
        conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed an existing conversation for lookup-only actions.
    pub fn insert(&self, phone_number_id: &str, user_phone: &str, conversation: Conversation) {
        let mut conversations = self.conversations.lock().unwrap_or_else(|e| e.into_inner());
        conversations.insert(
            (phone_number_id.to_string(), user_phone.to_string()),
            conversation,
        );
    }
}

impl Default for MemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn get_or_create(
        &self,
        phone_number_id: &str,
        user_phone: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<Conversation> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let mut conversations = self.conversations.lock().unwrap_or_else(|e| e.into_inner());
        let key = (phone_number_id.to_string(), user_phone.to_string());
        if let Some(existing) = conversations.get(&key) {
            return Ok(existing.clone());
        }
        let conversation = Conversation {
            id: format!("conv-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            tags: tags.clone(),
        };
        conversations.insert(key, conversation.clone());
        Ok(conversation)
    }

    async fn get(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        let conversations = self.conversations.lock().unwrap_or_else(|e| e.into_inner());
        Ok(conversations
            .values()
            .find(|c| c.id == conversation_id)
            .cloned())
    }
}

/// Integration state with fixed values.
pub struct StaticState {
    default_phone_number_id: Option<String>,
    token: String,
}

impl StaticState {
    pub fn new(default_phone_number_id: Option<&str>) -> Self {
        Self {
            default_phone_number_id: default_phone_number_id.map(str::to_string),
            token: "test-token".into(),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }
}

#[async_trait]
impl IntegrationState for StaticState {
    async fn default_phone_number_id(&self) -> Result<Option<String>> {
        Ok(self.default_phone_number_id.clone())
    }

    async fn access_token(&self) -> Result<Credential> {
        Ok(Credential::new(self.token.clone()))
    }
}

/// One outbound send observed by [`ScriptedClient`].
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub phone_number_id: String,
    pub to: String,
    pub body: serde_json::Value,
}

/// Messaging client that replays scripted responses and records every send.
///
/// With nothing scripted, every send is accepted with a generated message id.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<SendResponse>>>,
    sent: Mutex<Vec<SentMessage>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue the response for the next send.
    pub fn respond_with(&self, response: Result<SendResponse>) {
        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        responses.push_back(response);
    }

    /// Every send observed so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.len()
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingClient for ScriptedClient {
    async fn send_message(
        &self,
        _credential: &Credential,
        phone_number_id: &str,
        to: &str,
        body: serde_json::Value,
    ) -> Result<SendResponse> {
        {
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.push(SentMessage {
                phone_number_id: phone_number_id.to_string(),
                to: to.to_string(),
                body,
            });
        }
        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        match responses.pop_front() {
            Some(response) => response,
            None => Ok(SendResponse::accepted(format!(
                "wamid.{}",
                self.sent_count()
            ))),
        }
    }
}

/// Log sink that captures messages for assertions.
#[derive(Default)]
pub struct RecordingLog {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn infos(&self) -> Vec<String> {
        let infos = self.infos.lock().unwrap_or_else(|e| e.into_inner());
        infos.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        let errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors.clone()
    }
}

impl OperatorLog for RecordingLog {
    fn info(&self, message: &str) {
        let mut infos = self.infos.lock().unwrap_or_else(|e| e.into_inner());
        infos.push(message.to_string());
    }

    fn error(&self, message: &str) {
        let mut errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors.push(message.to_string());
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> BTreeMap<String, String> {
        BTreeMap::from([("userPhone".to_string(), "15550001111".to_string())])
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = MemoryConversationStore::new();
        let first = store
            .get_or_create("123", "15550001111", &tags())
            .await
            .unwrap();
        let second = store
            .get_or_create("123", "15550001111", &tags())
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve_calls(), 2);
    }

    #[tokio::test]
    async fn distinct_pairs_get_distinct_conversations() {
        let store = MemoryConversationStore::new();
        let a = store
            .get_or_create("123", "15550001111", &tags())
            .await
            .unwrap();
        let b = store
            .get_or_create("123", "15550002222", &tags())
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn get_finds_by_id() {
        let store = MemoryConversationStore::new();
        let created = store
            .get_or_create("123", "15550001111", &tags())
            .await
            .unwrap();
        let found = store.get(&created.id).await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(created.id));
        assert!(store.get("conv-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scripted_client_defaults_to_accepted() {
        let client = ScriptedClient::new();
        let credential = Credential::new("t");
        let response = client
            .send_message(&credential, "123", "15550001111", serde_json::json!({}))
            .await
            .unwrap();
        assert!(response.error.is_none());
        assert!(response.message_id.is_some());
        assert_eq!(client.sent_count(), 1);
    }

    #[tokio::test]
    async fn scripted_client_replays_queued_responses() {
        let client = ScriptedClient::new();
        client.respond_with(Ok(SendResponse::rejected(serde_json::json!({
            "code": 131026
        }))));
        let credential = Credential::new("t");
        let response = client
            .send_message(&credential, "123", "15550001111", serde_json::json!({}))
            .await
            .unwrap();
        assert!(response.error.is_some());
    }
}
