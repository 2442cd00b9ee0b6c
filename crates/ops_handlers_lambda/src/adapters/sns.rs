use aws_sdk_sns::error::DisplayErrorContext;
use ops_handlers_core::audit::AlertMessage;

use crate::adapters::alert_publisher::AlertPublisher;

pub struct SnsAlertPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsAlertPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

impl AlertPublisher for SnsAlertPublisher {
    fn publish_alert(&self, alert: &AlertMessage) -> Result<(), String> {
        let client = self.client.clone();
        let topic_arn = self.topic_arn.clone();
        let subject = alert.subject.clone();
        let message = alert.body.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to publish alert to sns: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}
