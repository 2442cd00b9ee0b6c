use ops_handlers_core::audit::AlertMessage;

pub trait AlertPublisher {
    fn publish_alert(&self, alert: &AlertMessage) -> Result<(), String>;
}
