use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use ops_handlers_core::record::{normalize_number_text, Record, EMPLOYEE_ID_FIELD};
use serde_json::{Map, Value};

use crate::adapters::record_store::RecordStore;

pub type Item = HashMap<String, AttributeValue>;

pub struct DynamoDbRecordStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordStore for DynamoDbRecordStore {
    fn get_record(&self, employee_id: &str) -> Result<Option<Record>, String> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key = AttributeValue::S(employee_id.to_string());

        let item = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_item()
                    .table_name(table_name)
                    .key(EMPLOYEE_ID_FIELD, key)
                    .send()
                    .await
                    .map(|output| output.item().cloned())
                    .map_err(|error| {
                        format!(
                            "failed to read item from dynamodb: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })?;

        item.as_ref().map(item_to_record).transpose()
    }

    fn put_record(&self, record: &Record) -> Result<(), String> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item = record_to_item(record);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to write item to dynamodb: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

pub fn record_to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.clone(), json_to_attribute(value)))
        .collect()
}

pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// Converts a stored item into a record with attributes ordered by name.
pub fn item_to_record(item: &Item) -> Result<Record, String> {
    let mut names: Vec<&String> = item.keys().collect();
    names.sort();

    let mut record = Map::with_capacity(names.len());
    for name in names {
        let value = attribute_to_json(&item[name])
            .map_err(|error| format!("attribute '{name}': {error}"))?;
        record.insert(name.clone(), value);
    }
    Ok(record)
}

pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, String> {
    match value {
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::N(text) => normalize_number_text(text),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(fields) => item_to_record(fields).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|text| normalize_number_text(text))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => {
            Err("binary attributes cannot be rendered as JSON".to_string())
        }
        _ => Err("unsupported attribute type".to_string()),
    }
}
