use serde::{Deserialize, Serialize};

use missive_channels::{Error, Result};

use crate::{
    conversation, dispatch, identity,
    payload::{OutboundPayload, TemplateMessage},
};

use super::WhatsAppBusiness;

/// Input for [`WhatsAppBusiness::start_conversation`] and
/// [`WhatsAppBusiness::send_template_message`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartConversation {
    /// Phone number of the user to contact.
    pub user_phone: String,
    /// Name of an approved message template.
    pub template_name: String,
    /// Template language code. Defaults to `en`.
    pub template_language: Option<String>,
    /// JSON array of values for the template's body variables.
    pub template_variables_json: Option<String>,
    /// Sender phone number id. Defaults to the provisioned sender.
    pub phone_number_id: Option<String>,
}

/// Output of every conversation-starting action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedConversation {
    pub conversation_id: String,
}

impl WhatsAppBusiness {
    /// Proactively open a conversation with a user by sending a template
    /// message. Templates are the only message kind the network accepts
    /// outside an active messaging window.
    pub async fn start_conversation(
        &self,
        input: StartConversation,
    ) -> Result<StartedConversation> {
        self.send_template(input).await
    }

    /// Send a template message to a user.
    ///
    /// Same pipeline as [`WhatsAppBusiness::start_conversation`]; the
    /// network does not distinguish the first template in a thread from
    /// later ones.
    pub async fn send_template_message(
        &self,
        input: StartConversation,
    ) -> Result<StartedConversation> {
        self.send_template(input).await
    }

    async fn send_template(&self, input: StartConversation) -> Result<StartedConversation> {
        if input.user_phone.is_empty() {
            return Err(self.fail(Error::validation("a user phone number is required")));
        }
        let message = TemplateMessage::build(
            &input.template_name,
            input.template_language.as_deref(),
            input.template_variables_json.as_deref(),
        )
        .map_err(|e| self.fail(e))?;

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
            &OutboundPayload::Template(message),
        )
        .await?;

        Ok(StartedConversation {
            conversation_id: conversation.id,
        })
    }
}
