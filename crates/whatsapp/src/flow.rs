//! Flow descriptor resolution.
//!
//! A [`FlowDescriptor`] is the caller's loose description of the interactive
//! flow to start. [`FlowDescriptor::resolve`] checks every structural rule
//! once and produces a [`ResolvedFlow`] whose tagged fields downstream code
//! matches exhaustively, so no presence checks leak past this boundary.

use serde::Deserialize;

use missive_channels::{Error, Result};

/// Publication state of a flow, sent as the `mode` action parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    Published,
    Draft,
}

impl FlowMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }
}

/// How the first screen of a flow obtains its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowActionKind {
    /// Open a named screen, optionally passing initial data.
    #[default]
    Navigate,
    /// The business's flow endpoint supplies the first screen.
    DataExchange,
}

/// Caller-facing description of the flow to start.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowDescriptor {
    /// Unique id assigned to the flow by the network.
    pub flow_id: Option<String>,
    /// Business-assigned name, accepted as an alternative to the id.
    pub flow_name: Option<String>,
    /// Label of the button that opens the flow (network cap: 20 characters,
    /// enforced at the form layer).
    pub flow_cta: String,
    /// Business-generated token identifying this flow execution.
    pub flow_token: Option<String>,
    /// Published or draft. Omitted from the wire when unset.
    pub mode: Option<FlowMode>,
    /// Defaults to navigate when unset.
    pub flow_action: FlowActionKind,
    /// First screen to open. Required when navigating.
    pub screen: Option<String>,
    /// JSON object with the first screen's input data. Must decode to a
    /// non-empty object when present.
    pub data_json: Option<String>,
}

/// Flow identity accepted by the network: an id or a name, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowRef {
    Id(String),
    Name(String),
}

impl FlowRef {
    /// Identity string for logs and dispatch errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Id(id) => format!("flow id {id:?}"),
            Self::Name(name) => format!("flow name {name:?}"),
        }
    }
}

/// Validated action mode with its resolved parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowAction {
    /// Open `screen`, optionally passing `data` as its input.
    Navigate {
        screen: String,
        data: Option<serde_json::Map<String, serde_json::Value>>,
    },
    /// First screen comes from the flow endpoint; no screen or data travel
    /// on the wire.
    DataExchange,
}

impl FlowAction {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::DataExchange => "data_exchange",
        }
    }
}

/// A descriptor that passed structural validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFlow {
    pub reference: FlowRef,
    pub cta: String,
    pub token: Option<String>,
    pub mode: Option<FlowMode>,
    pub action: FlowAction,
}

impl FlowDescriptor {
    /// Validate the descriptor and resolve defaults.
    ///
    /// All structural flow errors surface here, before any conversation or
    /// network work happens. When both an id and a name are supplied the id
    /// wins, matching the network's own precedence.
    pub fn resolve(&self) -> Result<ResolvedFlow> {
        let reference = match (non_empty(&self.flow_id), non_empty(&self.flow_name)) {
            (Some(id), _) => FlowRef::Id(id.to_string()),
            (None, Some(name)) => FlowRef::Name(name.to_string()),
            (None, None) => {
                return Err(Error::validation(
                    "provide either a flow id or a flow name",
                ));
            },
        };

        let action = match self.flow_action {
            FlowActionKind::Navigate => {
                let Some(screen) = non_empty(&self.screen) else {
                    return Err(Error::validation(
                        "a screen must be provided when the flow action is navigate",
                    ));
                };
                let data = match self.data_json.as_deref().filter(|raw| !raw.is_empty()) {
                    None => None,
                    Some(raw) => Some(parse_flow_data(raw)?),
                };
                FlowAction::Navigate {
                    screen: screen.to_string(),
                    data,
                }
            },
            FlowActionKind::DataExchange => FlowAction::DataExchange,
        };

        Ok(ResolvedFlow {
            reference,
            cta: self.flow_cta.clone(),
            token: self.flow_token.clone(),
            mode: self.mode,
            action,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The navigate data payload must be a JSON object with at least one key.
fn parse_flow_data(raw: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let parsed: serde_json::Value = serde_json::from_str(raw).map_err(|err| {
        Error::validation(format!("flow data is not valid JSON ({err}), got: {raw}"))
    })?;
    match parsed {
        serde_json::Value::Object(map) if !map.is_empty() => Ok(map),
        _ => Err(Error::validation(format!(
            "flow data must be a non-empty JSON object, got: {raw}"
        ))),
    }
}
