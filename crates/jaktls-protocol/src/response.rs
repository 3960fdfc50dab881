//! Outbound responses.
//!
//! Responses are never validated out of inbound JSON here; a server only
//! builds them, with [`ResponseMessage::ok`] or [`ResponseMessage::err`],
//! and dumps them.

use jaktls_json::{JsonString, Object, Value};

use crate::decode::Dump;
use crate::jsonrpc::{Message, RequestId};
use crate::types::ErrorCode;

/// The id a response echoes back.
///
/// `Null` is for errors detected before the request id could be read,
/// such as a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseId {
    Number(i64),
    String(JsonString),
    Null,
}

impl From<RequestId> for ResponseId {
    fn from(id: RequestId) -> Self {
        match id {
            RequestId::Number(n) => ResponseId::Number(n),
            RequestId::String(s) => ResponseId::String(s),
        }
    }
}

impl From<&RequestId> for ResponseId {
    fn from(id: &RequestId) -> Self {
        ResponseId::from(id.clone())
    }
}

impl From<i64> for ResponseId {
    fn from(id: i64) -> Self {
        ResponseId::Number(id)
    }
}

impl From<&str> for ResponseId {
    fn from(id: &str) -> Self {
        ResponseId::String(id.into())
    }
}

impl From<ResponseId> for Value {
    fn from(id: ResponseId) -> Self {
        match id {
            ResponseId::Number(n) => Value::from(n),
            ResponseId::String(s) => Value::String(s),
            ResponseId::Null => Value::Null,
        }
    }
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseError {
    code: ErrorCode,
    message: JsonString,
    data: Option<Value>,
}

impl ResponseError {
    pub fn new(code: ErrorCode, message: impl Into<JsonString>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// An error carrying the code's default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }

    /// Attaches additional information about the error.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &JsonString {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl From<ErrorCode> for ResponseError {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

impl Dump for ResponseError {
    fn dump(self) -> Object {
        let mut target = Object::new();
        target.set("code", self.code.code());
        target.set("message", self.message);
        if let Some(data) = self.data {
            target.set("data", data);
        }
        target
    }
}

/// Exactly one of a result or an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok(Value),
    Err(ResponseError),
}

/// A response to a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMessage {
    id: ResponseId,
    outcome: Outcome,
}

impl ResponseMessage {
    /// A successful response.
    pub fn ok(id: impl Into<ResponseId>, result: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Ok(result.into()),
        }
    }

    /// A failed response.
    pub fn err(id: impl Into<ResponseId>, error: impl Into<ResponseError>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Err(error.into()),
        }
    }

    pub fn id(&self) -> &ResponseId {
        &self.id
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ResponseError> {
        match &self.outcome {
            Outcome::Ok(_) => None,
            Outcome::Err(error) => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Err(_))
    }

    pub fn into_parts(self) -> (ResponseId, Outcome) {
        (self.id, self.outcome)
    }
}

impl Dump for ResponseMessage {
    fn dump(self) -> Object {
        let mut target = Object::new();
        Message::dump(&mut target);
        target.set("id", self.id);
        match self.outcome {
            Outcome::Ok(result) => target.set("result", result),
            Outcome::Err(error) => target.set("error", error.dump()),
        };
        target
    }
}
