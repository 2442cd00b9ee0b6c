use ops_handlers_core::contract::{
    response_for_error, success_response, ApiGatewayResponse, EMPLOYEE_NOT_FOUND_MESSAGE,
};
use ops_handlers_core::error::HandlerError;
use ops_handlers_core::record::{Record, EMPLOYEE_ID_FIELD};
use serde_json::Value;

use crate::adapters::record_store::RecordStore;
use crate::handlers::log_handler_error;

const COMPONENT: &str = "record_reader";

/// Looks up one employee by the `employee_id` query parameter.
pub fn handle_get_employee(event: &Value, store: &impl RecordStore) -> ApiGatewayResponse {
    match get_employee(event, store) {
        Ok(record) => {
            tracing::info!(component = COMPONENT, "record found");
            success_response(200, &Value::Object(record))
        }
        Err(error) => {
            log_handler_error(COMPONENT, &error);
            response_for_error(&error)
        }
    }
}

fn get_employee(event: &Value, store: &impl RecordStore) -> Result<Record, HandlerError> {
    let employee_id = employee_id_param(event)?;

    store
        .get_record(employee_id)
        .map_err(HandlerError::Store)?
        .ok_or_else(|| HandlerError::NotFound(EMPLOYEE_NOT_FOUND_MESSAGE.to_string()))
}

fn employee_id_param(event: &Value) -> Result<&str, HandlerError> {
    let value = event
        .get("queryStringParameters")
        .and_then(Value::as_object)
        .and_then(|params| params.get(EMPLOYEE_ID_FIELD))
        .ok_or_else(|| HandlerError::validation("employee_id parameter is required"))?;

    value
        .as_str()
        .ok_or_else(|| HandlerError::validation("employee_id parameter must be a string"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    struct FakeStore {
        record: Option<Record>,
        failure: Option<String>,
        lookups: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with_record(record: Value) -> Self {
            let record = match record {
                Value::Object(fields) => fields,
                _ => panic!("record fixture must be an object"),
            };
            Self {
                record: Some(record),
                failure: None,
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                record: None,
                failure: None,
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                record: None,
                failure: Some(message.to_string()),
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().expect("poisoned mutex").clone()
        }
    }

    impl RecordStore for FakeStore {
        fn get_record(&self, employee_id: &str) -> Result<Option<Record>, String> {
            self.lookups
                .lock()
                .expect("poisoned mutex")
                .push(employee_id.to_string());
            match &self.failure {
                Some(message) => Err(message.clone()),
                None => Ok(self.record.clone()),
            }
        }

        fn put_record(&self, _record: &Record) -> Result<(), String> {
            panic!("reader must not write");
        }
    }

    #[test]
    fn missing_parameter_returns_400_without_lookup() {
        let store = FakeStore::empty();
        for event in [
            json!({}),
            json!({"queryStringParameters": null}),
            json!({"queryStringParameters": {"id": "E-1"}}),
        ] {
            let response = handle_get_employee(&event, &store);
            assert_eq!(response.status_code, 400);
            assert_eq!(
                response.body_json().expect("body should parse"),
                json!({"error": "employee_id parameter is required"})
            );
        }
        assert!(store.lookups().is_empty());
    }

    #[test]
    fn found_record_returns_200_with_record_body() {
        let store = FakeStore::with_record(json!({
            "employee_id": "E-1",
            "name": "Ada",
            "salary": 50000,
            "bonus": 50000.5
        }));

        let response = handle_get_employee(
            &json!({"queryStringParameters": {"employee_id": "E-1"}}),
            &store,
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            r#"{"employee_id":"E-1","name":"Ada","salary":50000,"bonus":50000.5}"#
        );
        assert_eq!(store.lookups(), vec!["E-1".to_string()]);
    }

    #[test]
    fn absent_record_returns_404() {
        let store = FakeStore::empty();
        let response = handle_get_employee(
            &json!({"queryStringParameters": {"employee_id": "E-404"}}),
            &store,
        );

        assert_eq!(response.status_code, 404);
        assert_eq!(
            response.body_json().expect("body should parse"),
            json!({"error": "Employee not found"})
        );
    }

    #[test]
    fn store_failure_returns_500_with_details() {
        let store = FakeStore::failing("failed to read item from dynamodb: AccessDenied");
        let response = handle_get_employee(
            &json!({"queryStringParameters": {"employee_id": "E-1"}}),
            &store,
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().expect("body should parse"),
            json!({
                "error": "Internal server error",
                "details": "failed to read item from dynamodb: AccessDenied"
            })
        );
    }
}
