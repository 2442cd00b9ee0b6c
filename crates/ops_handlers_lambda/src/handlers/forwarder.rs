use ops_handlers_core::audit::{AlertMessage, AuditEvent, SnsBatch};
use ops_handlers_core::error::HandlerError;
use serde_json::Value;

use crate::adapters::alert_publisher::AlertPublisher;

const COMPONENT: &str = "audit_alert_forwarder";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardSummary {
    pub envelopes_processed: usize,
    pub alerts_published: usize,
}

/// Publishes one alert per `UnauthorizedOperation` event in the batch.
///
/// Envelopes are handled in order. The first failure aborts the remaining
/// envelopes and is returned so the trigger redelivers the whole batch.
pub fn handle_audit_batch(
    event: Value,
    publisher: &impl AlertPublisher,
) -> Result<ForwardSummary, HandlerError> {
    match forward_alerts(event, publisher) {
        Ok(summary) => {
            tracing::info!(
                component = COMPONENT,
                envelopes_processed = summary.envelopes_processed,
                alerts_published = summary.alerts_published,
                "batch processed"
            );
            Ok(summary)
        }
        Err(error) => {
            tracing::error!(component = COMPONENT, error = %error, "error processing event");
            Err(error)
        }
    }
}

fn forward_alerts(
    event: Value,
    publisher: &impl AlertPublisher,
) -> Result<ForwardSummary, HandlerError> {
    let batch = SnsBatch::from_value(event)?;
    let mut summary = ForwardSummary::default();

    for envelope in &batch.records {
        let audit_event = AuditEvent::parse(&envelope.sns.message)?;
        tracing::debug!(
            component = COMPONENT,
            event_name = %audit_event.event_name(),
            source_ip = %audit_event.source_ip(),
            event_time = %audit_event.event_time(),
            "cloudtrail event"
        );
        summary.envelopes_processed += 1;

        if !audit_event.is_unauthorized_operation() {
            continue;
        }

        let alert = AlertMessage::for_event(&audit_event)?;
        tracing::info!(component = COMPONENT, alert = %alert.body, "publishing alert");
        publisher
            .publish_alert(&alert)
            .map_err(HandlerError::Publish)?;
        summary.alerts_published += 1;
    }

    Ok(summary)
}
