//! Compact JSON serialization.
//!
//! Output carries no insignificant whitespace and keeps object entries in
//! insertion order. Strings are emitted as pure ASCII: the parser's escape
//! set is written symbolically and every other code unit outside printable
//! ASCII becomes `\uXXXX`, so lone surrogates survive a round trip.

use std::fmt::{self, Write};

use crate::{JsonString, Object, Value};

const HEX: &[u8; 16] = b"0123456789abcdef";

fn write_string(out: &mut impl Write, s: &JsonString) -> fmt::Result {
    out.write_char('"')?;
    for &unit in s.units() {
        match unit {
            0x22 => out.write_str("\\\"")?,
            0x5C => out.write_str("\\\\")?,
            0x2F => out.write_str("\\/")?,
            0x08 => out.write_str("\\b")?,
            0x0C => out.write_str("\\f")?,
            0x0A => out.write_str("\\n")?,
            0x0D => out.write_str("\\r")?,
            0x09 => out.write_str("\\t")?,
            0x20..=0x7E => out.write_char(char::from(unit as u8))?,
            _ => write_unicode_escape(out, unit)?,
        }
    }
    out.write_char('"')
}

/// `\uXXXX`, most significant nibble first.
fn write_unicode_escape(out: &mut impl Write, unit: u16) -> fmt::Result {
    out.write_str("\\u")?;
    for shift in [12, 8, 4, 0] {
        let nibble = usize::from((unit >> shift) & 0xF);
        out.write_char(char::from(HEX[nibble]))?;
    }
    Ok(())
}

fn write_number(out: &mut impl Write, n: f64) -> fmt::Result {
    if n.is_finite() {
        write!(out, "{n}")
    } else {
        out.write_str("null")
    }
}

fn write_object(out: &mut impl Write, object: &Object) -> fmt::Result {
    out.write_char('{')?;
    for (i, (key, value)) in object.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write_string(out, key)?;
        out.write_char(':')?;
        write_value(out, value)?;
    }
    out.write_char('}')
}

fn write_value(out: &mut impl Write, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(true) => out.write_str("true"),
        Value::Bool(false) => out.write_str("false"),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Object(object) => write_object(out, object),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_object(f, self)
    }
}

impl Value {
    /// Serializes to compact JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_value(&mut out, self);
        out
    }
}
