//! Outbound payload construction.
//!
//! Builders are pure and synchronous: every structural rule is checked here,
//! and the result carries the exact Graph API message fragment via
//! [`OutboundPayload::wire_body`]. The transport adds the recipient envelope.

use serde_json::{Map, Value, json};

use missive_channels::{Error, Result};

use crate::{
    config::{DEFAULT_TEMPLATE_LANGUAGE, FLOW_MESSAGE_VERSION},
    flow::{FlowAction, FlowRef, ResolvedFlow},
};

/// A validated template message.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMessage {
    name: String,
    language: String,
    variables: Vec<String>,
}

impl TemplateMessage {
    /// Build a template payload.
    ///
    /// `variables_json`, when present, must be a JSON array; each element
    /// becomes one body parameter in order. String elements are used
    /// verbatim, other values are serialized compactly.
    pub fn build(
        name: &str,
        language: Option<&str>,
        variables_json: Option<&str>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::validation("a template name is required"));
        }
        let language = language
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE_LANGUAGE);
        let variables = match variables_json.filter(|raw| !raw.is_empty()) {
            None => Vec::new(),
            Some(raw) => parse_template_variables(raw)?,
        };
        Ok(Self {
            name: name.to_string(),
            language: language.to_string(),
            variables,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

fn parse_template_variables(raw: &str) -> Result<Vec<String>> {
    let parsed: Value = serde_json::from_str(raw).map_err(|err| {
        Error::validation(format!(
            "template variables are not valid JSON ({err}), got: {raw}"
        ))
    })?;
    let Value::Array(items) = parsed else {
        return Err(Error::validation(format!(
            "template variables must be a JSON array, got: {raw}"
        )));
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// A validated interactive flow message.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowMessage {
    body_text: String,
    flow: ResolvedFlow,
}

impl FlowMessage {
    pub fn build(body_text: &str, flow: ResolvedFlow) -> Result<Self> {
        if body_text.is_empty() {
            return Err(Error::validation("flow message body text is required"));
        }
        Ok(Self {
            body_text: body_text.to_string(),
            flow,
        })
    }

    #[must_use]
    pub fn flow(&self) -> &ResolvedFlow {
        &self.flow
    }
}

/// A plain text message. Link previews are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    body: String,
}

impl TextMessage {
    pub fn build(body: &str) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::validation("text message body is required"));
        }
        Ok(Self {
            body: body.to_string(),
        })
    }
}

/// Marks the triggering message read and shows the typing indicator.
///
/// The network dismisses the indicator on its own when a reply arrives or
/// after its timeout; there is no explicit stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingIndicator {
    message_id: String,
}

impl TypingIndicator {
    #[must_use]
    pub fn read(message_id: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
        }
    }
}

/// The message kinds this channel can dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundPayload {
    Template(TemplateMessage),
    InteractiveFlow(FlowMessage),
    Text(TextMessage),
    Typing(TypingIndicator),
}

impl OutboundPayload {
    /// The Graph API message fragment for this payload.
    #[must_use]
    pub fn wire_body(&self) -> Value {
        match self {
            Self::Template(message) => {
                let mut template = json!({
                    "name": message.name,
                    "language": { "code": message.language },
                });
                // The network rejects an empty parameter list, so the body
                // component is omitted entirely without variables.
                if !message.variables.is_empty() {
                    template["components"] = json!([{
                        "type": "body",
                        "parameters": message.variables.iter().map(|text| json!({
                            "type": "text",
                            "text": text
                        })).collect::<Vec<_>>()
                    }]);
                }
                json!({ "type": "template", "template": template })
            },
            Self::InteractiveFlow(message) => {
                let mut parameters = Map::new();
                parameters.insert(
                    "flow_message_version".into(),
                    Value::String(FLOW_MESSAGE_VERSION.into()),
                );
                parameters.insert("flow_cta".into(), Value::String(message.flow.cta.clone()));
                if let Some(token) = &message.flow.token {
                    parameters.insert("flow_token".into(), Value::String(token.clone()));
                }
                if let Some(mode) = message.flow.mode {
                    parameters.insert("mode".into(), Value::String(mode.as_str().into()));
                }
                match &message.flow.reference {
                    FlowRef::Id(id) => {
                        parameters.insert("flow_id".into(), Value::String(id.clone()));
                    },
                    FlowRef::Name(name) => {
                        parameters.insert("flow_name".into(), Value::String(name.clone()));
                    },
                }
                parameters.insert(
                    "flow_action".into(),
                    Value::String(message.flow.action.as_str().into()),
                );
                if let FlowAction::Navigate { screen, data } = &message.flow.action {
                    let mut payload = Map::new();
                    payload.insert("screen".into(), Value::String(screen.clone()));
                    if let Some(data) = data {
                        payload.insert("data".into(), Value::Object(data.clone()));
                    }
                    parameters.insert("flow_action_payload".into(), Value::Object(payload));
                }
                json!({
                    "type": "interactive",
                    "interactive": {
                        "type": "flow",
                        "body": { "text": message.body_text },
                        "action": { "name": "flow", "parameters": parameters },
                    }
                })
            },
            Self::Text(message) => json!({
                "type": "text",
                "text": { "preview_url": true, "body": message.body }
            }),
            Self::Typing(indicator) => json!({
                "status": "read",
                "message_id": indicator.message_id,
                "typing_indicator": { "type": "text" }
            }),
        }
    }

    /// Short label naming the payload's identity and mode, for logs and
    /// dispatch errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Template(message) => {
                format!("template {:?} ({})", message.name, message.language)
            },
            Self::InteractiveFlow(message) => format!(
                "{} with action {}",
                message.flow.reference.describe(),
                message.flow.action.as_str()
            ),
            Self::Text(_) => "text message".into(),
            Self::Typing(_) => "typing indicator".into(),
        }
    }
}
