use serde::Deserialize;

use missive_channels::{Error, Result, ensure_billable};

use crate::{
    config, conversation, dispatch,
    flow::FlowDescriptor,
    identity,
    payload::{FlowMessage, OutboundPayload},
};

use super::{StartedConversation, WhatsAppBusiness};

/// Input for [`WhatsAppBusiness::start_flow`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartFlow {
    /// Phone number of the user to contact.
    pub user_phone: String,
    /// Sender phone number id. Defaults to the provisioned sender.
    pub phone_number_id: Option<String>,
    /// Text shown above the flow's call-to-action button.
    pub body_text: String,
    /// The flow to start.
    pub flow: FlowDescriptor,
}

impl WhatsAppBusiness {
    /// Send an interactive flow message to a user.
    ///
    /// Flows are billable, so sandbox accounts are gated out before any
    /// other work. All structural validation happens before the conversation
    /// is resolved or anything reaches the network.
    pub async fn start_flow(&self, input: StartFlow) -> Result<StartedConversation> {
        ensure_billable(self.mode, "starting a flow").map_err(|e| self.fail(e))?;
        if input.user_phone.is_empty() {
            return Err(self.fail(Error::validation("a user phone number is required")));
        }
        config::validate_flow_cta(&input.flow.flow_cta).map_err(|e| self.fail(e))?;
        let resolved = input.flow.resolve().map_err(|e| self.fail(e))?;
        let message =
            FlowMessage::build(&input.body_text, resolved).map_err(|e| self.fail(e))?;

        let phone_number_id = identity::resolve_phone_number_id(
            self.state.as_ref(),
            input.phone_number_id.as_deref(),
        )
        .await
        .map_err(|e| self.fail(e))?;
        let conversation = conversation::resolve_conversation(
            self.store.as_ref(),
            &phone_number_id,
            &input.user_phone,
        )
        .await
        .map_err(|e| self.fail(e))?;

        let credential = identity::access_credential(self.state.as_ref())
            .await
            .map_err(|e| self.fail(e))?;
        dispatch::send(
            self.client.as_ref(),
            self.log.as_ref(),
            &credential,
            &phone_number_id,
            &input.user_phone,
            &OutboundPayload::InteractiveFlow(message),
        )
        .await?;

        Ok(StartedConversation {
            conversation_id: conversation.id,
        })
    }
}
