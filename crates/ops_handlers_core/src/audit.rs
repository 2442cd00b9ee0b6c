//! CloudTrail audit events delivered through SNS, and the alerts derived from
//! them.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};

use crate::error::HandlerError;

/// Event name that triggers an alert.
pub const UNAUTHORIZED_OPERATION_EVENT: &str = "UnauthorizedOperation";
pub const ALERT_SUBJECT: &str = "CloudTrail UnauthorizedOperation Alert";

pub const UNKNOWN_EVENT: &str = "UnknownEvent";
pub const UNKNOWN_IP: &str = "UnknownIP";
pub const UNKNOWN_TIME: &str = "UnknownTime";
pub const UNKNOWN_USER: &str = "UnknownUser";

const DETAILS_INDENT: &[u8] = b"    ";

/// Batch of SNS envelopes as handed to a subscribed function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnsBatch {
    #[serde(rename = "Records")]
    pub records: Vec<SnsEnvelope>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnsEnvelope {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnsNotification {
    #[serde(rename = "Message")]
    pub message: String,
}

impl SnsBatch {
    pub fn from_value(event: Value) -> Result<Self, HandlerError> {
        serde_json::from_value(event)
            .map_err(|error| HandlerError::MalformedEvent(format!("invalid SNS batch: {error}")))
    }
}

/// One decoded CloudTrail record. The full object is retained so the alert
/// can reproduce it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    fields: Map<String, Value>,
}

impl AuditEvent {
    pub fn parse(message: &str) -> Result<Self, HandlerError> {
        match serde_json::from_str::<Value>(message) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err(HandlerError::MalformedEvent(
                "audit event must be a JSON object".to_string(),
            )),
            Err(error) => Err(HandlerError::MalformedEvent(format!(
                "invalid audit event JSON: {error}"
            ))),
        }
    }

    pub fn event_name(&self) -> String {
        self.text_or("eventName", UNKNOWN_EVENT)
    }

    pub fn source_ip(&self) -> String {
        self.text_or("sourceIPAddress", UNKNOWN_IP)
    }

    pub fn event_time(&self) -> String {
        self.text_or("eventTime", UNKNOWN_TIME)
    }

    /// Actor descriptor; an empty object when absent. Any other non-object
    /// value is malformed.
    pub fn user_identity(&self) -> Result<Map<String, Value>, HandlerError> {
        match self.fields.get("userIdentity") {
            None => Ok(Map::new()),
            Some(Value::Object(identity)) => Ok(identity.clone()),
            Some(other) => Err(HandlerError::MalformedEvent(format!(
                "userIdentity must be an object, got {other}"
            ))),
        }
    }

    pub fn user_arn(&self) -> Result<String, HandlerError> {
        Ok(render_text(self.user_identity()?.get("arn"), UNKNOWN_USER))
    }

    pub fn is_unauthorized_operation(&self) -> bool {
        matches!(
            self.fields.get("eventName"),
            Some(Value::String(name)) if name == UNAUTHORIZED_OPERATION_EVENT
        )
    }

    /// Event rendered as ASCII-only JSON indented by four spaces.
    pub fn to_indented_json(&self) -> Result<String, HandlerError> {
        let mut buffer = Vec::new();
        let formatter = AsciiPrettyFormatter::new(DETAILS_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.fields.serialize(&mut serializer).map_err(|error| {
            HandlerError::MalformedEvent(format!("failed to render audit event: {error}"))
        })?;
        String::from_utf8(buffer).map_err(|error| {
            HandlerError::MalformedEvent(format!("failed to render audit event: {error}"))
        })
    }

    fn text_or(&self, key: &str, placeholder: &str) -> String {
        render_text(self.fields.get(key), placeholder)
    }
}

fn render_text(value: Option<&Value>, placeholder: &str) -> String {
    match value {
        None => placeholder.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Pretty printer that writes every non-ASCII character as `\\uXXXX`
/// (UTF-16 surrogate pairs above the BMP).
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new(indent: &'a [u8]) -> Self {
        Self {
            inner: PrettyFormatter::with_indent(indent),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        let mut run_start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[run_start..index].as_bytes())?;
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            run_start = index + ch.len_utf8();
        }
        writer.write_all(fragment[run_start..].as_bytes())
    }
}

/// Notification derived from an [`AuditEvent`], published once and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    pub fn for_event(event: &AuditEvent) -> Result<Self, HandlerError> {
        let details = event.to_indented_json()?;
        let body = format!(
            "ALERT: {UNAUTHORIZED_OPERATION_EVENT} detected!\n\n\
             User: {}\n\
             Source IP: {}\n\
             Event Time: {}\n\
             Event Details: {details}",
            event.user_arn()?,
            event.source_ip(),
            event.event_time(),
        );
        Ok(Self {
            subject: ALERT_SUBJECT.to_string(),
            body,
        })
    }
}
