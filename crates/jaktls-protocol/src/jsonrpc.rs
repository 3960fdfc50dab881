//! JSON-RPC 2.0 envelope, requests and notifications.

use std::fmt;

use jaktls_json::{Array, JsonString, Object, Value};

use crate::decode::{Dump, Validate, reject};
use crate::messages::CancelParams;

/// The only protocol version accepted or emitted.
pub const JSONRPC_VERSION: &str = "2.0";

/// How far above its floor a numeric id may be and still count as an
/// integer.
pub const ID_INTEGER_TOLERANCE: f64 = 1e-9;

/// The abstract message every request, response and notification extends.
#[derive(Debug, Clone, Copy)]
pub struct Message;

impl Message {
    /// Whether `object` carries `"jsonrpc": "2.0"`.
    #[must_use]
    pub fn check(object: &Object) -> bool {
        check_envelope("Message", object).is_some()
    }

    /// Checks the envelope and consumes the `jsonrpc` key.
    ///
    /// Returns `false`, leaving `value` untouched, if `value` is not an
    /// object with `"jsonrpc": "2.0"`.
    pub fn validate(value: &mut Value) -> bool {
        match value.as_object_mut() {
            Some(object) if Self::check(object) => {
                object.remove_expect("jsonrpc");
                true
            }
            _ => false,
        }
    }

    /// Writes the envelope into `target`.
    pub fn dump(target: &mut Object) {
        target.set("jsonrpc", JSONRPC_VERSION);
    }
}

fn check_envelope(message_type: &str, object: &Object) -> Option<()> {
    match object.get("jsonrpc") {
        Some(Value::String(version)) if version.eq_str(JSONRPC_VERSION) => Some(()),
        Some(_) => reject(message_type, "`jsonrpc` is not \"2.0\""),
        None => reject(message_type, "missing `jsonrpc`"),
    }
}

/// A request id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestId {
    /// Integer id (numeric ids are coerced within [`ID_INTEGER_TOLERANCE`]).
    Number(i64),
    /// String id.
    String(JsonString),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.into())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id.into())
    }
}

impl From<JsonString> for RequestId {
    fn from(id: JsonString) -> Self {
        RequestId::String(id)
    }
}

impl From<RequestId> for Value {
    fn from(id: RequestId) -> Self {
        match id {
            RequestId::Number(n) => Value::from(n),
            RequestId::String(s) => Value::String(s),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

/// Which form of id the check phase found.
#[derive(Debug, Clone, Copy)]
pub(crate) enum IdShape {
    String,
    Number(i64),
}

pub(crate) fn check_id(message_type: &str, object: &Object) -> Option<IdShape> {
    match object.get("id") {
        None => reject(message_type, "missing `id`"),
        Some(Value::String(_)) => Some(IdShape::String),
        Some(value) => match value.try_integer(ID_INTEGER_TOLERANCE) {
            Some(n) => Some(IdShape::Number(n)),
            None => reject(message_type, "`id` is neither a string nor an integer"),
        },
    }
}

pub(crate) fn extract_id(shape: IdShape, object: &mut Object) -> RequestId {
    let value = object.remove_expect("id");
    match shape {
        IdShape::String => RequestId::String(value.into_string()),
        IdShape::Number(n) => RequestId::Number(n),
    }
}

fn check_method(message_type: &str, object: &Object) -> Option<()> {
    match object.get("method") {
        Some(Value::String(_)) => Some(()),
        Some(_) => reject(message_type, "`method` is not a string"),
        None => reject(message_type, "missing `method`"),
    }
}

/// Returns whether `params` is present.
fn check_params(message_type: &str, object: &Object) -> Option<bool> {
    match object.get("params") {
        None => Some(false),
        Some(Value::Array(_) | Value::Object(_)) => Some(true),
        Some(_) => reject(message_type, "`params` is neither an array nor an object"),
    }
}

fn extract_params(present: bool, object: &mut Object) -> Option<Params> {
    present.then(|| Params::from_checked(object.remove_expect("params")))
}

/// Structured request or notification parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Array(Array),
    Object(Object),
}

impl Params {
    #[track_caller]
    fn from_checked(value: Value) -> Self {
        match value {
            Value::Array(a) => Params::Array(a),
            Value::Object(o) => Params::Object(o),
            other => unreachable!("params were checked, found {}", other.kind()),
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Params::Array(a) => Some(a),
            Params::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Params::Object(o) => Some(o),
            Params::Array(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Params::Array(a) => Value::Array(a),
            Params::Object(o) => Value::Object(o),
        }
    }
}

impl From<Array> for Params {
    fn from(a: Array) -> Self {
        Params::Array(a)
    }
}

impl From<Object> for Params {
    fn from(o: Object) -> Self {
        Params::Object(o)
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

/// A request: expects a response carrying the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMessage {
    id: RequestId,
    method: JsonString,
    params: Option<Params>,
}

/// Check-phase result for [`RequestMessage`].
#[derive(Debug)]
pub struct RequestShape {
    id: IdShape,
    has_params: bool,
}

impl RequestMessage {
    /// Builds an outbound request.
    pub fn new(id: impl Into<RequestId>, method: impl Into<JsonString>, params: Option<Params>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// Cheap pre-check telling a request apart from a notification.
    ///
    /// True if `value` is an object with both `id` and `method` keys. Does
    /// not consume anything and does not imply the request is valid.
    #[must_use]
    pub fn identify(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|object| object.has_key("id") && object.has_key("method"))
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn method(&self) -> &JsonString {
        &self.method
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn into_parts(self) -> (RequestId, JsonString, Option<Params>) {
        (self.id, self.method, self.params)
    }
}

impl Validate for RequestMessage {
    type Shape = RequestShape;

    fn check(object: &Object) -> Option<RequestShape> {
        check_envelope("RequestMessage", object)?;
        let id = check_id("RequestMessage", object)?;
        check_method("RequestMessage", object)?;
        let has_params = check_params("RequestMessage", object)?;
        Some(RequestShape { id, has_params })
    }

    fn extract(shape: RequestShape, object: &mut Object) -> Self {
        object.remove_expect("jsonrpc");
        Self {
            id: extract_id(shape.id, object),
            method: object.remove_expect("method").into_string(),
            params: extract_params(shape.has_params, object),
        }
    }
}

impl Dump for RequestMessage {
    fn dump(self) -> Object {
        let mut target = Object::new();
        Message::dump(&mut target);
        target.set("id", self.id);
        target.set("method", self.method);
        if let Some(params) = self.params {
            target.set("params", params);
        }
        target
    }
}

/// A notification: fire-and-forget, no id and no response.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    method: JsonString,
    params: Option<Params>,
}

/// Check-phase result for [`NotificationMessage`].
#[derive(Debug)]
pub struct NotificationShape {
    has_params: bool,
}

impl NotificationMessage {
    /// Builds an outbound notification.
    pub fn new(method: impl Into<JsonString>, params: Option<Params>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    pub fn method(&self) -> &JsonString {
        &self.method
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn into_parts(self) -> (JsonString, Option<Params>) {
        (self.method, self.params)
    }

    /// Methods starting with `$/` depend on the protocol implementation;
    /// a receiver is free to ignore such notifications.
    pub fn is_implementation_dependent(&self) -> bool {
        self.method.starts_with("$/")
    }

    /// Decodes the payload of a `$/cancelRequest` notification.
    ///
    /// `None` if this is another method or the params do not validate.
    pub fn into_cancel_params(self) -> Option<CancelParams> {
        if !self.method.eq_str(CancelParams::METHOD) {
            return None;
        }
        let mut params = self.params?.into_value();
        CancelParams::validate(&mut params)
    }
}

impl Validate for NotificationMessage {
    type Shape = NotificationShape;

    fn check(object: &Object) -> Option<NotificationShape> {
        check_envelope("NotificationMessage", object)?;
        check_method("NotificationMessage", object)?;
        let has_params = check_params("NotificationMessage", object)?;
        Some(NotificationShape { has_params })
    }

    fn extract(shape: NotificationShape, object: &mut Object) -> Self {
        object.remove_expect("jsonrpc");
        Self {
            method: object.remove_expect("method").into_string(),
            params: extract_params(shape.has_params, object),
        }
    }
}

impl Dump for NotificationMessage {
    fn dump(self) -> Object {
        let mut target = Object::new();
        Message::dump(&mut target);
        target.set("method", self.method);
        if let Some(params) = self.params {
            target.set("params", params);
        }
        target
    }
}

/// Any message a server receives that it must act on.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    Request(RequestMessage),
    Notification(NotificationMessage),
}

/// Check-phase result for [`IncomingMessage`].
#[derive(Debug)]
pub struct IncomingShape(IncomingKind);

#[derive(Debug)]
enum IncomingKind {
    Request(RequestShape),
    Notification(NotificationShape),
}

impl IncomingMessage {
    pub fn method(&self) -> &JsonString {
        match self {
            IncomingMessage::Request(r) => r.method(),
            IncomingMessage::Notification(n) => n.method(),
        }
    }

    pub fn id(&self) -> Option<&RequestId> {
        match self {
            IncomingMessage::Request(r) => Some(r.id()),
            IncomingMessage::Notification(_) => None,
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, IncomingMessage::Request(_))
    }
}

impl Validate for IncomingMessage {
    type Shape = IncomingShape;

    /// Objects with both `id` and `method` are checked as requests,
    /// everything else as notifications.
    fn check(object: &Object) -> Option<IncomingShape> {
        let kind = if object.has_key("id") && object.has_key("method") {
            IncomingKind::Request(RequestMessage::check(object)?)
        } else {
            IncomingKind::Notification(NotificationMessage::check(object)?)
        };
        Some(IncomingShape(kind))
    }

    fn extract(shape: IncomingShape, object: &mut Object) -> Self {
        match shape.0 {
            IncomingKind::Request(s) => IncomingMessage::Request(RequestMessage::extract(s, object)),
            IncomingKind::Notification(s) => {
                IncomingMessage::Notification(NotificationMessage::extract(s, object))
            }
        }
    }
}

impl Dump for IncomingMessage {
    fn dump(self) -> Object {
        match self {
            IncomingMessage::Request(r) => r.dump(),
            IncomingMessage::Notification(n) => n.dump(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaktls_json::parse;

    fn json(text: &str) -> Value {
        parse(text).unwrap_or_else(|| panic!("fixture should parse: {text}"))
    }

    #[test]
    fn envelope_requires_version_two() {
        let mut ok = json(r#"{"jsonrpc":"2.0","x":1}"#);
        assert!(Message::validate(&mut ok));
        assert!(!ok.expect_object().has_key("jsonrpc"));
        assert!(ok.expect_object().has_key("x"));

        for text in [r#"{"jsonrpc":"1.0"}"#, r#"{"jsonrpc":2}"#, r#"{}"#, r#"[]"#, r#""2.0""#] {
            let mut value = json(text);
            let before = value.clone();
            assert!(!Message::validate(&mut value), "{text}");
            assert_eq!(value, before, "rejected input must be untouched");
        }
    }

    #[test]
    fn request_with_integer_id() {
        let mut value = json(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);
        let request = RequestMessage::validate(&mut value).unwrap();
        assert_eq!(request.id(), &RequestId::Number(1));
        assert_eq!(request.method(), "initialize");
        assert!(request.params().is_none());
        assert!(value.expect_object().is_empty());
    }

    #[test]
    fn request_with_string_id_and_params() {
        let mut value = json(r#"{"jsonrpc":"2.0","id":"a-1","method":"m","params":[1,2]}"#);
        let request = RequestMessage::validate(&mut value).unwrap();
        assert_eq!(request.id(), &RequestId::from("a-1"));
        assert_eq!(request.params().and_then(Params::as_array).map(Vec::len), Some(2));
    }

    #[test]
    fn request_rejections() {
        for text in [
            r#"{"jsonrpc":"1.0","id":1,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":1.5,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":true,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":null,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":1}"#,
            r#"{"jsonrpc":"2.0","id":1,"method":7}"#,
            r#"{"jsonrpc":"2.0","id":1,"method":"m","params":"x"}"#,
            r#"{"jsonrpc":"2.0","id":1,"method":"m","params":null}"#,
            r#"{"id":1,"method":"m"}"#,
        ] {
            let mut value = json(text);
            let before = value.clone();
            assert!(RequestMessage::validate(&mut value).is_none(), "{text}");
            assert_eq!(value, before, "{text}");
        }
    }

    #[test]
    fn near_integral_ids_are_coerced() {
        let mut value = Value::from(
            [
                ("jsonrpc", Value::from("2.0")),
                ("id", Value::Number(42.0 + 1e-12)),
                ("method", Value::from("m")),
            ]
            .into_iter()
            .collect::<Object>(),
        );
        let request = RequestMessage::validate(&mut value).unwrap();
        assert_eq!(request.id(), &RequestId::Number(42));
    }

    #[test]
    fn identify_needs_id_and_method_only() {
        assert!(RequestMessage::identify(&json(r#"{"id":1,"method":"m"}"#)));
        assert!(RequestMessage::identify(&json(r#"{"id":[],"method":3}"#)));
        assert!(!RequestMessage::identify(&json(r#"{"method":"m"}"#)));
        assert!(!RequestMessage::identify(&json(r#"{"id":1}"#)));
        assert!(!RequestMessage::identify(&json("[1]")));
    }

    #[test]
    fn notification_validation() {
        let mut value = json(r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#);
        let note = NotificationMessage::validate(&mut value).unwrap();
        assert_eq!(note.method(), "initialized");
        assert!(note.params().and_then(Params::as_object).is_some());
        assert!(!note.is_implementation_dependent());

        // An id is neither required nor consumed.
        let mut value = json(r#"{"jsonrpc":"2.0","id":3,"method":"exit"}"#);
        assert!(NotificationMessage::validate(&mut value).is_some());
        assert!(value.expect_object().has_key("id"));

        assert!(NotificationMessage::validate(&mut json(r#"{"jsonrpc":"2.0"}"#)).is_none());
        assert!(NotificationMessage::validate(&mut json(r#"{"jsonrpc":"2.0","method":"m","params":1}"#)).is_none());
    }

    #[test]
    fn decode_exposes_leftover_fields() {
        let decoded =
            RequestMessage::decode(json(r#"{"extra":true,"jsonrpc":"2.0","id":9,"method":"m","more":[]}"#)).unwrap();
        assert!(decoded.has_unknown_fields());
        let keys: Vec<String> = decoded.leftover().keys().map(JsonString::to_string_lossy).collect();
        assert_eq!(keys, ["extra", "more"]);
        assert!(decoded.strict().is_none());

        let decoded = RequestMessage::decode(json(r#"{"jsonrpc":"2.0","id":9,"method":"m"}"#)).unwrap();
        assert_eq!(decoded.strict().map(|r| r.id().clone()), Some(RequestId::Number(9)));
    }

    #[test]
    fn incoming_classifies_by_identify() {
        let incoming = IncomingMessage::validate(&mut json(r#"{"jsonrpc":"2.0","id":"x","method":"shutdown"}"#)).unwrap();
        assert!(incoming.is_request());
        assert_eq!(incoming.id(), Some(&RequestId::from("x")));

        let incoming = IncomingMessage::validate(&mut json(r#"{"jsonrpc":"2.0","method":"exit"}"#)).unwrap();
        assert!(!incoming.is_request());
        assert_eq!(incoming.method(), "exit");

        // Looks like a request, so a bad id is not waved through as a notification.
        assert!(IncomingMessage::validate(&mut json(r#"{"jsonrpc":"2.0","id":0.5,"method":"m"}"#)).is_none());
        // A response is neither.
        assert!(IncomingMessage::validate(&mut json(r#"{"jsonrpc":"2.0","id":1,"result":null}"#)).is_none());
    }

    #[test]
    fn dumped_requests_validate_again() {
        let mut params = Object::new();
        params.set("processId", Value::Null);
        let request = RequestMessage::new(7i64, "initialize", Some(params.into()));
        let text = request.clone().into_value().to_json_string();
        assert_eq!(text, r#"{"jsonrpc":"2.0","id":7,"method":"initialize","params":{"processId":null}}"#);
        assert_eq!(RequestMessage::validate(&mut json(&text)), Some(request));
    }

    #[test]
    fn dumped_notifications_validate_again() {
        let note = NotificationMessage::new("textDocument/didSave", None);
        let text = note.clone().into_value().to_json_string();
        assert_eq!(text, r#"{"jsonrpc":"2.0","method":"textDocument\/didSave"}"#);
        assert_eq!(NotificationMessage::validate(&mut json(&text)), Some(note));
    }

    #[test]
    fn cancel_request_notifications() {
        let note = NotificationMessage::validate(&mut json(
            r#"{"jsonrpc":"2.0","method":"$/cancelRequest","params":{"id":"req-4"}}"#,
        ))
        .unwrap();
        assert!(note.is_implementation_dependent());
        let cancel = note.into_cancel_params().unwrap();
        assert_eq!(cancel.id(), &RequestId::from("req-4"));

        let other = NotificationMessage::new("$/progress", Some(Object::new().into()));
        assert!(other.is_implementation_dependent());
        assert!(other.into_cancel_params().is_none());

        let bad = NotificationMessage::new(CancelParams::METHOD, Some(Params::Array(vec![Value::from(1)])));
        assert!(bad.into_cancel_params().is_none());
    }
}
