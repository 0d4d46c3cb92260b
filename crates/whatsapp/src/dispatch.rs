//! Dispatch execution: one send, one interpreted outcome.

use tracing::debug;

use missive_channels::{Credential, Error, MessagingClient, OperatorLog, Result, log::fail};

use crate::payload::OutboundPayload;

#[cfg(feature = "metrics")]
use missive_metrics::{counter, labels, whatsapp as whatsapp_metrics};

/// Send `payload` through the messaging client and interpret the result.
///
/// The send capability is invoked exactly once; retries belong to the
/// surrounding platform. A response carrying an error value, like a
/// transport-level failure, becomes a dispatch error whose message embeds
/// the payload identity and the raw upstream content. The operator log sees
/// every outcome before the caller does.
pub async fn send(
    client: &dyn MessagingClient,
    log: &dyn OperatorLog,
    credential: &Credential,
    phone_number_id: &str,
    to: &str,
    payload: &OutboundPayload,
) -> Result<()> {
    let label = payload.describe();
    let response = match client
        .send_message(credential, phone_number_id, to, payload.wire_body())
        .await
    {
        Ok(response) => response,
        Err(err) => {
            #[cfg(feature = "metrics")]
            counter!(whatsapp_metrics::MESSAGES_FAILED_TOTAL, labels::PAYLOAD => kind(payload))
                .increment(1);
            return Err(fail(
                log,
                Error::dispatch(format!("failed to send {label}: {err}")),
            ));
        },
    };

    if let Some(upstream) = response.error {
        #[cfg(feature = "metrics")]
        counter!(whatsapp_metrics::MESSAGES_FAILED_TOTAL, labels::PAYLOAD => kind(payload))
            .increment(1);
        return Err(fail(
            log,
            Error::dispatch(format!("failed to send {label}: {upstream}")),
        ));
    }

    debug!(
        phone_number_id,
        to,
        message_id = ?response.message_id,
        "message accepted"
    );
    log.info(&format!("sent {label} to {to}"));
    #[cfg(feature = "metrics")]
    counter!(whatsapp_metrics::MESSAGES_SENT_TOTAL, labels::PAYLOAD => kind(payload)).increment(1);
    Ok(())
}

#[cfg(feature = "metrics")]
fn kind(payload: &OutboundPayload) -> &'static str {
    match payload {
        OutboundPayload::Template(_) => "template",
        OutboundPayload::InteractiveFlow(_) => "flow",
        OutboundPayload::Text(_) => "text",
        OutboundPayload::Typing(_) => "typing",
    }
}
