//! Wire types for the `streaming_generate` endpoint and the mapping from
//! failure conditions to fixed user-facing messages. The accumulator reports
//! every failure through the update callback, so these strings are the whole
//! error surface a user ever sees.

use serde::{Deserialize, Serialize};

use crate::error::RippleError;

pub const MSG_RUNNING_LATE: &str =
    "Oops, the model is running late due to traffic. Please try again.";
pub const MSG_NETWORK: &str =
    "Oops, a network error occurred. Please try again in a few minutes.";
/// Fallback for unclassified HTTP error statuses.
pub const MSG_GENERIC: &str =
    "Oops, something went wrong. I couldn't provide you with a response. Please try again.";
/// Fallback for responses the client could not make sense of at all.
pub const MSG_UNEXPECTED: &str = "Oops, something went wrong. Please try again.";
pub const MSG_MODEL_DOWNLOADING: &str =
    "I am downloading the model. Please try again in a few minutes.";
pub const MSG_SERVERS_UNAVAILABLE: &str =
    "Servers are not available at this time. Please try again later.";
pub const MSG_ACCESS_DENIED: &str =
    "Sorry, you don't have access to this model. Please contact support to get it enabled.";
pub const MSG_OUT_OF_CREDITS: &str =
    "Sorry, you don't have enough credits. Please upgrade your plan to keep going.";

/// Request body for `POST {base_url}/streaming_generate`. Built once per
/// turn and re-sent verbatim for every polling cycle.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// None asks the backend for its default-configured model.
    pub model_name: Option<String>,
    pub out_type: OutType,
    pub prompt: Vec<String>,
    pub max_tokens: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutType {
    pub answer: &'static str,
}

impl GenerateRequest {
    pub fn new(model_name: Option<&str>, prompt: String, max_tokens: u64) -> Self {
        Self {
            model_name: model_name.map(str::to_string),
            out_type: OutType { answer: "string" },
            prompt: vec![prompt],
            max_tokens,
        }
    }
}

/// Successful (200) response body. `status[0]` is the completion flag;
/// `data[0].answer` is the cumulative answer text so far — each cycle's
/// fragment replaces the previous one, it is not a delta.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub status: Vec<bool>,
    pub data: Vec<AnswerSlot>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerSlot {
    pub answer: String,
}

impl GenerateResponse {
    pub fn from_value(value: serde_json::Value) -> Result<Self, RippleError> {
        serde_json::from_value(value)
            .map_err(|e| RippleError::SchemaParse(format!("streaming_generate response: {e}")))
    }

    /// True once the backend considers generation finished.
    pub fn finished(&self) -> bool {
        self.status.first().copied().unwrap_or(false)
    }

    /// Cumulative answer text so far.
    pub fn fragment(&self) -> &str {
        self.data
            .first()
            .map(|slot| slot.answer.as_str())
            .unwrap_or("")
    }
}

/// Server-supplied user message carried by some non-200 bodies as
/// `{"detail": {"detail": "..."}}`. Surfaced verbatim when present.
pub fn server_detail(body: &serde_json::Value) -> Option<&str> {
    body.get("detail")?.get("detail")?.as_str()
}

/// Classify an HTTP error status into a fixed user-facing message.
/// 513 and 561 are backend-specific extension codes.
pub fn classify_status(status: u16) -> &'static str {
    match status {
        513 => MSG_MODEL_DOWNLOADING,
        503 => MSG_SERVERS_UNAVAILABLE,
        561 => MSG_ACCESS_DENIED,
        402 => MSG_OUT_OF_CREDITS,
        _ => MSG_GENERIC,
    }
}
