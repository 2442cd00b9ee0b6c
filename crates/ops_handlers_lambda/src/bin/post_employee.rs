use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use ops_handlers_core::contract::ApiGatewayResponse;
use ops_handlers_lambda::adapters::clients::dynamodb_client;
use ops_handlers_lambda::adapters::dynamodb::DynamoDbRecordStore;
use ops_handlers_lambda::config::RecordStoreConfig;
use ops_handlers_lambda::handlers::writer::handle_post_employee;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &RecordStoreConfig,
) -> Result<ApiGatewayResponse, Error> {
    let store = DynamoDbRecordStore::new(dynamodb_client().await.clone(), &config.table_name);
    Ok(handle_post_employee(&event.payload, &store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = RecordStoreConfig::from_env();

    lambda_runtime::run(service_fn(|event| handle_request(event, &config))).await
}
