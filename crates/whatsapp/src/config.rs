//! Schema-level constants imposed by the WhatsApp Business Cloud API.
//!
//! The surrounding platform validates action inputs against these before an
//! action runs; they live here so the payload builders and the platform's
//! form layer agree on one definition.

use missive_channels::{Error, Result};

/// Template language used when the caller does not specify one.
pub const DEFAULT_TEMPLATE_LANGUAGE: &str = "en";

/// Flow API message version pinned by the Cloud API.
pub const FLOW_MESSAGE_VERSION: &str = "3";

/// Maximum length of a flow call-to-action button label.
pub const MAX_FLOW_CTA_LEN: usize = 20;

/// Conversation tag carrying the sender phone number id.
pub const TAG_PHONE_NUMBER_ID: &str = "phoneNumberId";

/// Conversation tag carrying the user's phone number.
pub const TAG_USER_PHONE: &str = "userPhone";

/// Check a flow button label against the network's length cap.
///
/// The flow action checks this at its input boundary; the payload builder
/// assumes it already passed.
pub fn validate_flow_cta(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::validation("a flow button label is required"));
    }
    if label.chars().count() > MAX_FLOW_CTA_LEN {
        return Err(Error::validation(format!(
            "flow button label exceeds {MAX_FLOW_CTA_LEN} characters: {label:?}"
        )));
    }
    Ok(())
}
