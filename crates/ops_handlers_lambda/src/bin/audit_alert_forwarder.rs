use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use ops_handlers_lambda::adapters::clients::sns_client;
use ops_handlers_lambda::adapters::sns::SnsAlertPublisher;
use ops_handlers_lambda::config::AlertConfig;
use ops_handlers_lambda::handlers::forwarder::handle_audit_batch;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>, config: &AlertConfig) -> Result<(), Error> {
    let publisher = SnsAlertPublisher::new(sns_client().await.clone(), &config.topic_arn);
    handle_audit_batch(event.payload, &publisher)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = AlertConfig::from_env().map_err(Error::from)?;

    lambda_runtime::run(service_fn(|event| handle_request(event, &config))).await
}
