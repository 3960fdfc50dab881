//! Two-phase decoding of inbound messages.

use jaktls_core::logging::targets;
use jaktls_json::{Object, Value};

/// A message type that can be validated out of a JSON object.
pub trait Validate: Sized {
    /// What the check phase learned about the object, handed to
    /// [`Validate::extract`].
    type Shape;

    /// Read-only schema check.
    fn check(object: &Object) -> Option<Self::Shape>;

    /// Moves the recognized fields out of `object`.
    ///
    /// `shape` must come from [`Validate::check`] on the same, unmodified
    /// object; extraction treats every field it describes as present and
    /// well-typed.
    fn extract(shape: Self::Shape, object: &mut Object) -> Self;

    /// Validates `value`, removing the recognized keys on success.
    ///
    /// On failure `value` is left exactly as it was, so it can be retried
    /// against another message type.
    fn validate(value: &mut Value) -> Option<Self> {
        let object = value.as_object_mut()?;
        let shape = Self::check(object)?;
        Some(Self::extract(shape, object))
    }

    /// Validates an owned value and keeps the unrecognized fields.
    fn decode(value: Value) -> Option<Decoded<Self>> {
        let mut leftover = value.try_into_object().ok()?;
        let shape = Self::check(&leftover)?;
        let message = Self::extract(shape, &mut leftover);
        Some(Decoded { message, leftover })
    }
}

/// A message type that renders to a JSON object.
pub trait Dump {
    fn dump(self) -> Object;

    fn into_value(self) -> Value
    where
        Self: Sized,
    {
        Value::Object(self.dump())
    }
}

/// A validated message together with the fields it did not consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    message: T,
    leftover: Object,
}

impl<T> Decoded<T> {
    pub fn message(&self) -> &T {
        &self.message
    }

    /// Fields present in the input that the message type does not define.
    pub fn leftover(&self) -> &Object {
        &self.leftover
    }

    pub fn has_unknown_fields(&self) -> bool {
        !self.leftover.is_empty()
    }

    pub fn into_message(self) -> T {
        self.message
    }

    pub fn into_parts(self) -> (T, Object) {
        (self.message, self.leftover)
    }

    /// The message, or `None` if the input carried unknown fields.
    pub fn strict(self) -> Option<T> {
        if self.leftover.is_empty() {
            Some(self.message)
        } else {
            log::debug!(
                target: targets::PROTOCOL,
                "strict decode rejected {} unknown field(s)",
                self.leftover.len()
            );
            None
        }
    }
}

/// Logs why a check failed and yields `None`.
pub(crate) fn reject<T>(message_type: &str, reason: &str) -> Option<T> {
    log::debug!(target: targets::PROTOCOL, "{message_type} rejected: {reason}");
    None
}
