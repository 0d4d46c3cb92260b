//! Action handlers exposed to the agent runtime.
//!
//! Every action runs the same straight-line pipeline: policy gate, input
//! validation, identity resolution, conversation resolution, dispatch. No
//! retry state, no partial results; one invocation yields exactly one
//! outcome, and every failure reaches the operator log before the caller.

mod start_conversation;
mod start_flow;
mod typing;

pub use {
    start_conversation::{StartConversation, StartedConversation},
    start_flow::StartFlow,
    typing::TypingTarget,
};

use std::sync::Arc;

use missive_channels::{
    ConfigMode, ConversationStore, Error, IntegrationState, MessagingClient, OperatorLog,
    TracingLog, log,
};

/// WhatsApp Business action adapter.
///
/// Holds the configuration mode and the capability handles the pipeline
/// runs over. Construct with [`WhatsAppBusiness::new`] and adjust with the
/// `with_*` builders.
pub struct WhatsAppBusiness {
    pub(crate) mode: ConfigMode,
    pub(crate) state: Arc<dyn IntegrationState>,
    pub(crate) store: Arc<dyn ConversationStore>,
    pub(crate) client: Arc<dyn MessagingClient>,
    pub(crate) log: Arc<dyn OperatorLog>,
}

impl WhatsAppBusiness {
    pub fn new(
        state: Arc<dyn IntegrationState>,
        store: Arc<dyn ConversationStore>,
        client: Arc<dyn MessagingClient>,
    ) -> Self {
        Self {
            mode: ConfigMode::default(),
            state,
            store,
            client,
            log: Arc::new(TracingLog),
        }
    }

    /// Set the configuration mode the policy gate checks.
    pub fn with_mode(mut self, mode: ConfigMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the operator log sink (defaults to the `tracing` bridge).
    pub fn with_operator_log(mut self, log: Arc<dyn OperatorLog>) -> Self {
        self.log = log;
        self
    }

    pub(crate) fn fail(&self, error: Error) -> Error {
        log::fail(self.log.as_ref(), error)
    }
}
