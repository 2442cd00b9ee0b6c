pub mod alert_publisher;
pub mod clients;
pub mod dynamodb;
pub mod record_store;
pub mod sns;
