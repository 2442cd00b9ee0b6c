use ops_handlers_core::contract::{
    message_response, response_for_error, ApiGatewayResponse, EMPLOYEE_ADDED_MESSAGE,
};
use ops_handlers_core::error::HandlerError;
use ops_handlers_core::record::{parse_record_body, validate_required_fields, EMPLOYEE_ID_FIELD};
use serde_json::Value;

use crate::adapters::record_store::RecordStore;
use crate::handlers::log_handler_error;

const COMPONENT: &str = "record_writer";

/// Validates the submitted record and stores it, replacing any record with the
/// same id.
pub fn handle_post_employee(event: &Value, store: &impl RecordStore) -> ApiGatewayResponse {
    match post_employee(event, store) {
        Ok(()) => message_response(201, EMPLOYEE_ADDED_MESSAGE),
        Err(error) => {
            log_handler_error(COMPONENT, &error);
            response_for_error(&error)
        }
    }
}

fn post_employee(event: &Value, store: &impl RecordStore) -> Result<(), HandlerError> {
    let record = parse_record_body(event.get("body"))?;
    validate_required_fields(&record)?;

    store.put_record(&record).map_err(HandlerError::Store)?;
    tracing::info!(
        component = COMPONENT,
        employee_id = ?record.get(EMPLOYEE_ID_FIELD),
        "record stored"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use ops_handlers_core::record::{Record, REQUIRED_FIELDS};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        items: Mutex<HashMap<String, Record>>,
        puts: Mutex<usize>,
        failure: Option<String>,
    }

    impl MemoryStore {
        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn put_count(&self) -> usize {
            *self.puts.lock().expect("poisoned mutex")
        }

        fn items(&self) -> HashMap<String, Record> {
            self.items.lock().expect("poisoned mutex").clone()
        }
    }

    impl RecordStore for MemoryStore {
        fn get_record(&self, employee_id: &str) -> Result<Option<Record>, String> {
            Ok(self.items().get(employee_id).cloned())
        }

        fn put_record(&self, record: &Record) -> Result<(), String> {
            *self.puts.lock().expect("poisoned mutex") += 1;
            if let Some(message) = &self.failure {
                return Err(message.clone());
            }
            let key = record[EMPLOYEE_ID_FIELD]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| record[EMPLOYEE_ID_FIELD].to_string());
            self.items
                .lock()
                .expect("poisoned mutex")
                .insert(key, record.clone());
            Ok(())
        }
    }

    fn complete_body() -> Value {
        json!({
            "employee_id": "E-1",
            "name": "Ada",
            "department": "Engineering",
            "role": "Engineer",
            "salary": 50000,
            "status": "active",
            "join_date": "2024-01-01",
            "location": "Oslo"
        })
    }

    fn event_for(body: &Value) -> Value {
        json!({ "body": body.to_string() })
    }

    #[test]
    fn absent_body_returns_400_without_put() {
        let store = MemoryStore::default();
        for event in [json!({}), json!({"body": null}), json!({"body": ""})] {
            let response = handle_post_employee(&event, &store);
            assert_eq!(response.status_code, 400);
            assert_eq!(
                response.body_json().expect("body should parse"),
                json!({"error": "Request body is required"})
            );
        }
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn each_missing_required_field_is_named_without_put() {
        let store = MemoryStore::default();
        for field in REQUIRED_FIELDS {
            let mut body = complete_body();
            body.as_object_mut()
                .expect("fixture is an object")
                .remove(field);

            let response = handle_post_employee(&event_for(&body), &store);
            assert_eq!(response.status_code, 400);
            assert_eq!(
                response.body_json().expect("body should parse"),
                json!({ "error": format!("Missing required field: {field}") })
            );
        }
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn undecodable_body_returns_500_with_details() {
        let store = MemoryStore::default();
        let response = handle_post_employee(&json!({"body": "{\"employee_id\":"}), &store);

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"]
            .as_str()
            .expect("details should be text")
            .starts_with("Malformed JSON body"));
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn array_body_names_missing_employee_id() {
        let store = MemoryStore::default();
        let response = handle_post_employee(&json!({"body": "[1,2]"}), &store);

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json().expect("body should parse"),
            json!({"error": "Missing required field: employee_id"})
        );
        assert_eq!(store.put_count(), 0);
    }

    #[test]
    fn complete_record_is_put_once_with_extra_fields() {
        let store = MemoryStore::default();
        let response = handle_post_employee(&event_for(&complete_body()), &store);

        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.body_json().expect("body should parse"),
            json!({"message": "Employee added successfully"})
        );
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.items()["E-1"]["location"], "Oslo");
    }

    #[test]
    fn repeated_write_leaves_a_single_record() {
        let store = MemoryStore::default();
        let event = event_for(&complete_body());

        handle_post_employee(&event, &store);
        let first = store.items();
        handle_post_employee(&event, &store);

        assert_eq!(store.items(), first);
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn store_failure_returns_500_with_details() {
        let store = MemoryStore::failing("failed to write item to dynamodb: throttled");
        let response = handle_post_employee(&event_for(&complete_body()), &store);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().expect("body should parse"),
            json!({
                "error": "Internal server error",
                "details": "failed to write item to dynamodb: throttled"
            })
        );
    }
}
