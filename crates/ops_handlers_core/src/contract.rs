use serde::Serialize;
use serde_json::{json, Value};

use crate::error::HandlerError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const EMPLOYEE_NOT_FOUND_MESSAGE: &str = "Employee not found";
pub const EMPLOYEE_ADDED_MESSAGE: &str = "Employee added successfully";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parses the JSON body back into a value. Test and logging helper.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

pub fn success_response(status_code: u16, payload: &Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}

pub fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    success_response(status_code, &json!({ "message": message }))
}

pub fn error_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    success_response(status_code, &json!({ "error": message }))
}

pub fn internal_error_response(details: &str) -> ApiGatewayResponse {
    success_response(
        500,
        &json!({
            "error": INTERNAL_ERROR_MESSAGE,
            "details": details,
        }),
    )
}

/// Maps a handler failure to its response shape.
pub fn response_for_error(error: &HandlerError) -> ApiGatewayResponse {
    if error.is_client_error() {
        error_response(error.status_code(), error.detail())
    } else {
        internal_error_response(error.detail())
    }
}
