//! Process-wide AWS clients, built on first use and reused by warm instances.

use aws_config::{BehaviorVersion, SdkConfig};
use tokio::sync::OnceCell;

static SDK_CONFIG: OnceCell<SdkConfig> = OnceCell::const_new();
static DYNAMODB_CLIENT: OnceCell<aws_sdk_dynamodb::Client> = OnceCell::const_new();
static SNS_CLIENT: OnceCell<aws_sdk_sns::Client> = OnceCell::const_new();

pub async fn sdk_config() -> &'static SdkConfig {
    SDK_CONFIG
        .get_or_init(|| aws_config::load_defaults(BehaviorVersion::latest()))
        .await
}

pub async fn dynamodb_client() -> &'static aws_sdk_dynamodb::Client {
    DYNAMODB_CLIENT
        .get_or_init(|| async { aws_sdk_dynamodb::Client::new(sdk_config().await) })
        .await
}

pub async fn sns_client() -> &'static aws_sdk_sns::Client {
    SNS_CLIENT
        .get_or_init(|| async { aws_sdk_sns::Client::new(sdk_config().await) })
        .await
}
