use serde::Deserialize;

use missive_channels::{Error, Result};

use crate::{
    conversation, dispatch, identity,
    payload::{OutboundPayload, TypingIndicator},
};

use super::WhatsAppBusiness;

/// Target of the typing-indicator actions: an existing conversation and the
/// user message being replied to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingTarget {
    pub conversation_id: String,
    pub message_id: String,
}

impl WhatsAppBusiness {
    /// Mark the triggering message read and show the typing indicator.
    ///
    /// The sender and user identities come from the conversation's tags, so
    /// this targets an existing conversation rather than resolving one.
    pub async fn start_typing_indicator(&self, input: TypingTarget) -> Result<()> {
        if input.message_id.is_empty() {
            return Err(self.fail(Error::validation("a message id is required")));
        }
        let conversation =
            conversation::lookup_conversation(self.store.as_ref(), &input.conversation_id)
                .await
                .map_err(|e| self.fail(e))?;
        let phone_number_id = conversation::sender_of(&conversation).map_err(|e| self.fail(e))?;
        let user_phone = conversation::user_of(&conversation).map_err(|e| self.fail(e))?;

        let credential = identity::access_credential(self.state.as_ref())
            .await
            .map_err(|e| self.fail(e))?;
        dispatch::send(
            self.client.as_ref(),
            self.log.as_ref(),
            &credential,
            phone_number_id,
            user_phone,
            &OutboundPayload::Typing(TypingIndicator::read(&input.message_id)),
        )
        .await
    }

    /// Dismissing the indicator is the network's job: it clears on reply or
    /// on its own timeout, and no stop endpoint exists. Validates the target
    /// conversation and succeeds without dispatching.
    pub async fn stop_typing_indicator(&self, input: TypingTarget) -> Result<()> {
        conversation::lookup_conversation(self.store.as_ref(), &input.conversation_id)
            .await
            .map(|_| ())
            .map_err(|e| self.fail(e))
    }
}
