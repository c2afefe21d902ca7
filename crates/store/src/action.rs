//! Dispatched actions.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A dispatched action: a type tag plus an optional JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type, conventionally `"<slice>/<verb>"`.
    pub kind: String,
    /// Free-form payload; `Null` when the action carries no data.
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    /// Create an action without a payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
        }
    }

    /// Create an action carrying `payload`.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// True when this action's type equals `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Deserialize the payload into `T`, returning `None` if it does not fit.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.payload.clone()).ok()
    }
}
