//! Wire payloads exchanged with the external emailer over ZeroMQ.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification handed to the emailer service when a constancia is approved.
/// The `document` field carries the declarative PDF definition; rendering
/// and delivery are the emailer's concern.
#[derive(Debug, Deserialize, Serialize)]
pub struct ZmqEmailMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub body_html: String,
    pub document: Value,
}
