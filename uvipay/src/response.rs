//! Raw transport results and their normalization into an [`Envelope`].

use serde_json::Value;

use crate::envelope::Envelope;

/// Body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Undecoded body text.
    Text(String),
    /// Body already decoded by the transport.
    Json(Value),
    /// No body.
    Empty,
}

/// A completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Body,
}

impl RawResponse {
    /// A response with a text body.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Body::Text(body.into()),
        }
    }

    /// A response with an already decoded JSON body.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Body::Json(body),
        }
    }

    /// A response without a body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            body: Body::Empty,
        }
    }
}

/// Transport-level failure.
///
/// When the failure happened after a response started arriving, the partial
/// response is kept so it can still be normalized.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Description of the failure.
    pub message: String,
    /// Response received before the failure, if any.
    pub response: Option<RawResponse>,
}

impl TransportError {
    /// A failure with no response at all, such as a refused connection.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// Attaches the response received before the failure.
    #[must_use]
    pub fn with_response(mut self, response: RawResponse) -> Self {
        self.response = Some(response);
        self
    }
}

/// Turns any transport outcome into exactly one [`Envelope`].
///
/// Text bodies are parsed as JSON; parsed and pre-decoded bodies are accepted
/// when they are objects with a `status` field. Everything else, including a
/// transport error without a response, yields [`Envelope::default_error`].
/// The HTTP status code is not consulted.
#[must_use]
pub fn normalize(outcome: Result<RawResponse, TransportError>) -> Envelope {
    let response = match outcome {
        Ok(response) => Some(response),
        Err(err) => err.response,
    };
    response
        .and_then(|response| envelope_from_body(response.body))
        .unwrap_or_else(Envelope::default_error)
}

fn envelope_from_body(body: Body) -> Option<Envelope> {
    match body {
        Body::Text(text) => serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(Envelope::from_value),
        Body::Json(value) => Envelope::from_value(value),
        Body::Empty => None,
    }
}
