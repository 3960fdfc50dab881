//! JSON value types.
//!
//! [`Value`] is a closed sum type; every consumption site matches it
//! exhaustively. Accessing a value as the wrong kind through an `expect_*`
//! accessor is a programming error and panics. The `as_*` views return
//! `Option` for code that inspects untrusted input.

use std::fmt;

use crate::JsonString;

/// A JSON array.
pub type Array = Vec<Value>;

/// Discriminant of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Lowercase JSON type name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Numbers are IEEE-754 doubles; no wider precision is kept.
    Number(f64),
    String(JsonString),
    Array(Array),
    Object(Object),
}

#[cold]
#[track_caller]
fn kind_mismatch(expected: Kind, actual: Kind) -> ! {
    panic!("JSON value is {actual}, expected {expected}")
}

impl Value {
    /// The active kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // Non-asserting views.

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&JsonString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    // Kind-asserting accessors. Each panics if the active kind differs.

    /// # Panics
    ///
    /// Panics if the value is not a boolean.
    #[track_caller]
    pub fn expect_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => kind_mismatch(Kind::Bool, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a number.
    #[track_caller]
    pub fn expect_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            other => kind_mismatch(Kind::Number, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a string.
    #[track_caller]
    pub fn expect_string(&self) -> &JsonString {
        match self {
            Value::String(s) => s,
            other => kind_mismatch(Kind::String, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an array.
    #[track_caller]
    pub fn expect_array(&self) -> &Array {
        match self {
            Value::Array(a) => a,
            other => kind_mismatch(Kind::Array, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an array.
    #[track_caller]
    pub fn expect_array_mut(&mut self) -> &mut Array {
        match self {
            Value::Array(a) => a,
            other => kind_mismatch(Kind::Array, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an object.
    #[track_caller]
    pub fn expect_object(&self) -> &Object {
        match self {
            Value::Object(o) => o,
            other => kind_mismatch(Kind::Object, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an object.
    #[track_caller]
    pub fn expect_object_mut(&mut self) -> &mut Object {
        match self {
            Value::Object(o) => o,
            other => kind_mismatch(Kind::Object, other.kind()),
        }
    }

    // Consuming conversions.

    /// Takes the string out, or gives the value back unchanged.
    pub fn try_into_string(self) -> Result<JsonString, Value> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }

    /// Takes the array out, or gives the value back unchanged.
    pub fn try_into_array(self) -> Result<Array, Value> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other),
        }
    }

    /// Takes the object out, or gives the value back unchanged.
    pub fn try_into_object(self) -> Result<Object, Value> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a string.
    #[track_caller]
    pub fn into_string(self) -> JsonString {
        match self {
            Value::String(s) => s,
            other => kind_mismatch(Kind::String, other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not an object.
    #[track_caller]
    pub fn into_object(self) -> Object {
        match self {
            Value::Object(o) => o,
            other => kind_mismatch(Kind::Object, other.kind()),
        }
    }

    /// Returns the number as an integer if it lies within `tolerance` above
    /// its floor.
    ///
    /// This is the only coercion the protocol layer applies to numeric ids.
    /// Non-numbers and non-finite numbers yield `None`. Values beyond the
    /// `i64` range saturate.
    ///
    /// ```
    /// use jaktls_json::Value;
    ///
    /// assert_eq!(Value::Number(7.0).try_integer(1e-9), Some(7));
    /// assert_eq!(Value::Number(7.5).try_integer(1e-9), None);
    /// assert_eq!(Value::Bool(true).try_integer(1e-9), None);
    /// ```
    #[must_use]
    pub fn try_integer(&self, tolerance: f64) -> Option<i64> {
        let value = self.as_number()?;
        if value - value.floor() <= tolerance {
            Some(value as i64)
        } else {
            None
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<JsonString> for Value {
    fn from(s: JsonString) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An insertion-ordered JSON object with unique keys.
///
/// Lookups are linear scans; protocol objects hold a handful of fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: Vec<(JsonString, Value)>,
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` if it is not already present.
    ///
    /// Returns `false` and leaves the existing entry untouched when the key
    /// exists.
    pub fn set(&mut self, key: impl Into<JsonString>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.entries.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.eq_str(key))
    }

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Value for a key the caller already knows is present.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent.
    #[track_caller]
    pub fn expect(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("JSON object has no key {key:?}"),
        }
    }

    /// # Panics
    ///
    /// Panics if `key` is absent.
    #[track_caller]
    pub fn expect_mut(&mut self, key: &str) -> &mut Value {
        match self.position(key) {
            Some(i) => &mut self.entries[i].1,
            None => panic!("JSON object has no key {key:?}"),
        }
    }

    /// Removes and returns the value for `key`, keeping the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Removes a key the caller already checked for.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent.
    #[track_caller]
    pub fn remove_expect(&mut self, key: &str) -> Value {
        match self.position(key) {
            Some(i) => self.entries.remove(i).1,
            None => panic!("JSON object has no key {key:?}"),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&JsonString, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &JsonString> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl IntoIterator for Object {
    type Item = (JsonString, Value);
    type IntoIter = std::vec::IntoIter<(JsonString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Collects pairs; when a key repeats, the first occurrence wins.
impl<K: Into<JsonString>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.set(k, v);
        }
        object
    }
}
