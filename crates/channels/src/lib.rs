//! Channel capability contracts.
//!
//! Each channel adapter (WhatsApp Business today) talks to the surrounding
//! platform through the narrow traits defined here: integration state,
//! conversation storage, the message transport, and the operator log. The
//! shared error taxonomy and configuration-mode gating live here too, so
//! every adapter surfaces the same typed outcomes.

pub mod client;
pub mod error;
pub mod gating;
pub mod log;
pub mod state;
pub mod store;
pub mod testkit;

pub use {
    client::{MessagingClient, SendResponse},
    error::{Error, Result},
    gating::{ConfigMode, ensure_billable},
    log::{OperatorLog, TracingLog},
    state::{Credential, IntegrationState},
    store::{Conversation, ConversationStore},
};
