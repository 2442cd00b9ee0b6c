use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::{Map, Number, Value};

use crate::error::HandlerError;

/// Field used as the exact-match key of the employee table.
pub const EMPLOYEE_ID_FIELD: &str = "employee_id";

/// Fields a new record must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 7] = [
    EMPLOYEE_ID_FIELD,
    "name",
    "department",
    "role",
    "salary",
    "status",
    "join_date",
];

/// Free-form employee record. Extra fields beyond [`REQUIRED_FIELDS`] are kept.
pub type Record = Map<String, Value>;

/// Turns the `body` member of an API Gateway proxy event into a record.
///
/// Text bodies are parsed as JSON; bodies already delivered as a JSON object
/// are used as-is. Undecodable bodies are not client errors: they surface as
/// internal failures with the decoder message as details.
pub fn parse_record_body(body: Option<&Value>) -> Result<Record, HandlerError> {
    let required = || HandlerError::validation("Request body is required");

    match body {
        None | Some(Value::Null) => Err(required()),
        Some(Value::String(text)) if text.is_empty() => Err(required()),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(record)) => Ok(record),
            // No named fields, so field validation reports the first required one.
            Ok(Value::Array(_) | Value::String(_)) => Ok(Record::new()),
            Ok(other) => Err(not_an_object(&other)),
            Err(error) => Err(HandlerError::MalformedEvent(format!(
                "Malformed JSON body: {error}"
            ))),
        },
        Some(Value::Object(record)) if record.is_empty() => Err(required()),
        Some(Value::Object(record)) => Ok(record.clone()),
        Some(other) => Err(not_an_object(other)),
    }
}

fn not_an_object(value: &Value) -> HandlerError {
    HandlerError::MalformedEvent(format!("Request body must be a JSON object, got {value}"))
}

/// Reports the first field of [`REQUIRED_FIELDS`] absent from `record`.
pub fn validate_required_fields(record: &Record) -> Result<(), HandlerError> {
    match REQUIRED_FIELDS
        .iter()
        .find(|field| !record.contains_key(**field))
    {
        Some(field) => Err(HandlerError::validation(format!(
            "Missing required field: {field}"
        ))),
        None => Ok(()),
    }
}

/// Renders decimal text as a JSON number: the exact integer digits when the
/// value has no fractional part, the nearest float otherwise.
pub fn normalize_number_text(text: &str) -> Result<Value, String> {
    let invalid = || format!("invalid numeric value '{text}'");
    let trimmed = text.trim();
    let decimal = BigDecimal::from_str(trimmed).map_err(|_| invalid())?;

    let whole = decimal.with_scale(0);
    if whole == decimal {
        let (digits, _) = whole.into_bigint_and_exponent();
        return Number::from_str(&digits.to_string())
            .map(Value::Number)
            .map_err(|_| invalid());
    }

    let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(invalid)
}
