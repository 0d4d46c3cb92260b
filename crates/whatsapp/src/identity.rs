//! Sender identity and credential resolution.

use tracing::debug;

use missive_channels::{Credential, Error, IntegrationState, Result};

/// Resolve the sender phone number id for an outbound call.
///
/// An explicit, non-empty id from the caller always wins; otherwise the
/// default provisioned in integration state is used. Having neither is
/// terminal for the calling action: nothing may be dispatched without a
/// sender identity.
pub async fn resolve_phone_number_id(
    state: &dyn IntegrationState,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(id) = explicit.filter(|id| !id.is_empty()) {
        debug!(phone_number_id = id, "using caller-supplied sender");
        return Ok(id.to_string());
    }
    match state.default_phone_number_id().await? {
        Some(id) if !id.is_empty() => {
            debug!(phone_number_id = %id, "using default sender");
            Ok(id)
        },
        _ => Err(Error::configuration(
            "no default sender phone number id is available",
        )),
    }
}

/// Read the access token that authenticates outbound calls.
pub async fn access_credential(state: &dyn IntegrationState) -> Result<Credential> {
    state.access_token().await
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, missive_channels::testkit::StaticState};

    #[tokio::test]
    async fn explicit_sender_wins_over_default() {
        let state = StaticState::new(Some("default-123"));
        let id = resolve_phone_number_id(&state, Some("explicit-456"))
            .await
            .unwrap();
        assert_eq!(id, "explicit-456");
    }

    #[tokio::test]
    async fn empty_explicit_sender_falls_back_to_default() {
        let state = StaticState::new(Some("default-123"));
        let id = resolve_phone_number_id(&state, Some("")).await.unwrap();
        assert_eq!(id, "default-123");
    }

    #[tokio::test]
    async fn missing_sender_is_a_configuration_error() {
        let state = StaticState::new(None);
        let err = resolve_phone_number_id(&state, None).await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("no default sender"));
    }
}
