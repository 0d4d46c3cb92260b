//! WhatsApp Business Cloud API action layer.
//!
//! Turns abstract agent actions (start a conversation with a template, start
//! an interactive flow, typing indicators) into well-formed Graph API sends:
//! resolves the sender identity and credential, finds or creates the
//! conversation, builds and validates the wire payload, dispatches it exactly
//! once, and maps every outcome onto the shared channel error taxonomy.
//!
//! All I/O goes through the capability traits in `missive-channels`, so the
//! whole pipeline runs against in-memory doubles in tests.

pub mod actions;
pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod flow;
pub mod identity;
pub mod payload;

pub use {
    actions::{
        StartConversation, StartFlow, StartedConversation, TypingTarget, WhatsAppBusiness,
    },
    flow::{FlowAction, FlowActionKind, FlowDescriptor, FlowMode, FlowRef, ResolvedFlow},
    missive_channels::{Error, Result},
    payload::OutboundPayload,
};
