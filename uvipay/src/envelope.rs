//! The normalized response envelope.
//!
//! Every client operation resolves to an [`Envelope`]: either the JSON object
//! the API returned, kept verbatim, or a locally synthesized
//! [`Envelope::default_error`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::constants::{DEFAULT_ERROR_CODE, DEFAULT_ERROR_MESSAGE, DEFAULT_ERROR_TYPE};

/// Key every valid envelope carries.
pub const STATUS_FIELD: &str = "status";

/// Normalized API response.
///
/// Holds the server's JSON object exactly as received. Success is read from
/// the `status` field; details from `data` and `error`. Fields specific to an
/// endpoint (for example `link_code` or `send_id`) are reachable through
/// [`Envelope::get`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Envelope(Map<String, Value>);

/// A JSON object without the `status` field cannot be an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("response object has no `status` field")]
pub struct MissingStatus;

impl Envelope {
    /// Wraps a JSON object if it carries a `status` field.
    #[must_use]
    pub fn from_object(object: Map<String, Value>) -> Option<Self> {
        object.contains_key(STATUS_FIELD).then_some(Self(object))
    }

    /// Wraps any JSON value that is an object carrying a `status` field.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            _ => None,
        }
    }

    /// The envelope returned when the server's reply is unusable or never
    /// arrived.
    #[must_use]
    pub fn default_error() -> Self {
        let mut object = Map::new();
        object.insert(STATUS_FIELD.to_owned(), Value::Bool(false));
        object.insert(
            "error".to_owned(),
            json!({
                "message": DEFAULT_ERROR_MESSAGE,
                "code": DEFAULT_ERROR_CODE,
                "type": DEFAULT_ERROR_TYPE,
            }),
        );
        Self(object)
    }

    /// Returns the `status` flag.
    ///
    /// Booleans are taken as is. Numbers are true when non-zero and strings
    /// when they read `"true"` or `"1"`. Anything else is false.
    #[must_use]
    pub fn status(&self) -> bool {
        match self.0.get(STATUS_FIELD) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
            _ => false,
        }
    }

    /// Returns `true` if the call succeeded and carries no error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status() && self.error().is_none()
    }

    /// Returns the `data` payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data").filter(|v| !v.is_null())
    }

    /// Deserializes the `data` payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is absent or does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.data().unwrap_or(&Value::Null))
    }

    /// Returns the `error` object, if any.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        match self.0.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::Object(object) => Some(ApiError::from_object(object)),
            Value::String(message) => Some(ApiError {
                message: message.clone(),
                ..ApiError::default()
            }),
            _ => Some(ApiError::default()),
        }
    }

    /// Returns a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the envelope, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Map<String, Value>> for Envelope {
    type Error = MissingStatus;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_object(object).ok_or(MissingStatus)
    }
}

impl From<Envelope> for Map<String, Value> {
    fn from(envelope: Envelope) -> Self {
        envelope.0
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        Self::Object(envelope.0)
    }
}

/// Error details reported in an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Machine-readable code, e.g. `server_response`.
    #[serde(default)]
    pub code: String,
    /// Error category, e.g. `request`.
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl ApiError {
    fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| match object.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Self {
            message: field("message"),
            code: field("code"),
            kind: field("type"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}
