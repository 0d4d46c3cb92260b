//! Metric name and label definitions.

/// WhatsApp Business action metrics
pub mod whatsapp {
    /// Total outbound messages accepted by the network
    pub const MESSAGES_SENT_TOTAL: &str = "missive_whatsapp_messages_sent_total";
    /// Total outbound sends rejected by the network or failed in transport
    pub const MESSAGES_FAILED_TOTAL: &str = "missive_whatsapp_messages_failed_total";
    /// Total conversations resolved (fetched or created) for actions
    pub const CONVERSATIONS_RESOLVED_TOTAL: &str = "missive_whatsapp_conversations_resolved_total";
}

/// Common label keys
pub mod labels {
    /// Payload kind being dispatched (template, flow, text, typing)
    pub const PAYLOAD: &str = "payload";
}
