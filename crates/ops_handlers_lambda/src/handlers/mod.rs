use ops_handlers_core::error::HandlerError;

pub mod forwarder;
pub mod reader;
pub mod writer;

/// Client-facing outcomes are informational; collaborator failures are errors.
pub(crate) fn log_handler_error(component: &str, error: &HandlerError) {
    if error.is_client_error() {
        tracing::info!(
            component,
            status_code = error.status_code(),
            reason = %error,
            "request rejected"
        );
    } else {
        tracing::error!(
            component,
            status_code = error.status_code(),
            error = %error,
            "request failed"
        );
    }
}
