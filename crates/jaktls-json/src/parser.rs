//! Fail-fast recursive descent JSON parser.
//!
//! The parser makes one pass over the input with a single code point of
//! lookahead. Any violation aborts the whole parse and [`parse`] returns
//! `None`; there is no partial tree and no error position for the caller.
//! The offset of the failure is emitted as a `trace` record on the
//! `jaktls::json` target.
//!
//! # Grammar
//!
//! - Whitespace is space, `\n`, `\r` and `\t`, and only appears between
//!   tokens.
//! - Arrays and objects accept a single trailing comma: `[1,2,]` and
//!   `{"a":1,}` parse.
//! - Duplicate object keys fail the parse.
//! - Numbers: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`. The integer
//!   and fraction form the mantissa `m`; an exponent `e` yields `m` raised
//!   to the power `e`, so `2e3` is `8` and `10e-1` is `0.1`. The sign is
//!   applied last.
//! - `\uXXXX` escapes produce exactly one UTF-16 code unit; surrogate pairs
//!   are not combined. Other characters are transcoded to UTF-16.
//! - The entire input must be consumed, apart from trailing whitespace.

use jaktls_core::logging::targets;

use crate::{Array, JsonString, Object, Value};

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    /// Maximum nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Parses a complete JSON document.
///
/// Returns `None` if the text is not valid JSON under the grammar above.
#[must_use]
pub fn parse(source: &str) -> Option<Value> {
    Parser::new(source).parse()
}

/// Parses a complete JSON document with custom limits.
#[must_use]
pub fn parse_with_limits(source: &str, limits: ParserLimits) -> Option<Value> {
    Parser::with_limits(source, limits).parse()
}

/// JSON parser over UTF-8 text.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a str,
    pos: usize,
    depth: usize,
    limits: ParserLimits,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_limits(source, ParserLimits::default())
    }

    #[must_use]
    pub fn with_limits(source: &'a str, limits: ParserLimits) -> Self {
        Self {
            source,
            pos: 0,
            depth: 0,
            limits,
        }
    }

    /// Parses one value and requires the input to end after it.
    pub fn parse(mut self) -> Option<Value> {
        let value = self.parse_value()?;
        if !self.is_eof() {
            return self.fail("trailing characters");
        }
        Some(value)
    }

    fn fail<T>(&self, what: &str) -> Option<T> {
        log::trace!(target: targets::JSON, "parse failed: {what} at byte {}", self.pos);
        None
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `expected` if it is next.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_literal(&mut self, literal: &str) -> bool {
        if self.source[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn peek_is_digit(&self) -> bool {
        self.peek().is_some_and(|c| c.is_ascii_digit())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\n' | '\r' | '\t')) {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_is_digit() {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_whitespace();
        let value = if self.eat_literal("false") {
            Value::Bool(false)
        } else if self.eat_literal("true") {
            Value::Bool(true)
        } else if self.eat_literal("null") {
            Value::Null
        } else {
            match self.peek() {
                Some('-' | '0'..='9') => Value::Number(self.parse_number()?),
                Some('"') => {
                    self.pos += 1;
                    Value::String(self.parse_string()?)
                }
                Some('[') => {
                    self.pos += 1;
                    Value::Array(self.parse_array()?)
                }
                Some('{') => {
                    self.pos += 1;
                    Value::Object(self.parse_object()?)
                }
                Some(_) => return self.fail("unexpected character"),
                None => return self.fail("unexpected end of input"),
            }
        };
        self.skip_whitespace();
        Some(value)
    }

    fn parse_number(&mut self) -> Option<f64> {
        let negative = self.eat('-');

        let mantissa_start = self.pos;
        match self.peek() {
            Some('0') => self.pos += 1,
            Some('1'..='9') => self.skip_digits(),
            _ => return self.fail("expected digit"),
        }
        if self.eat('.') {
            if !self.peek_is_digit() {
                return self.fail("expected fraction digit");
            }
            self.skip_digits();
        }
        let Ok(mantissa) = self.source[mantissa_start..self.pos].parse::<f64>() else {
            return self.fail("malformed mantissa");
        };

        let mut exponent = 1.0;
        if self.eat('e') || self.eat('E') {
            let negative_exponent = if self.eat('-') {
                true
            } else {
                self.eat('+');
                false
            };
            if !self.peek_is_digit() {
                return self.fail("expected exponent digit");
            }
            let start = self.pos;
            self.skip_digits();
            let Ok(magnitude) = self.source[start..self.pos].parse::<f64>() else {
                return self.fail("malformed exponent");
            };
            exponent = if negative_exponent { -magnitude } else { magnitude };
        }

        let value = mantissa.powf(exponent);
        Some(if negative { -value } else { value })
    }

    fn parse_hex_unit(&mut self) -> Option<u16> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) else {
                return self.fail("expected hex digit");
            };
            self.pos += 1;
            unit = (unit << 4) | digit as u16;
        }
        Some(unit)
    }

    /// Escape body; the backslash has been consumed.
    fn parse_escape(&mut self) -> Option<u16> {
        let unit = match self.next_char() {
            Some('"') => 0x22,
            Some('\\') => 0x5C,
            Some('/') => 0x2F,
            Some('b') => 0x08,
            Some('f') => 0x0C,
            Some('n') => 0x0A,
            Some('r') => 0x0D,
            Some('t') => 0x09,
            Some('u') => return self.parse_hex_unit(),
            _ => return self.fail("invalid escape"),
        };
        Some(unit)
    }

    /// String body; the opening quote has been consumed.
    fn parse_string(&mut self) -> Option<JsonString> {
        let mut value = JsonString::new();
        loop {
            match self.next_char() {
                Some('"') => return Some(value),
                Some('\\') => value.push_unit(self.parse_escape()?),
                Some(ch) => value.push_char(ch),
                None => return self.fail("unterminated string"),
            }
        }
    }

    fn enter(&mut self) -> Option<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return self.fail("nesting too deep");
        }
        Some(())
    }

    /// Array body; the opening bracket has been consumed.
    fn parse_array(&mut self) -> Option<Array> {
        self.enter()?;
        let mut values = Array::new();

        self.skip_whitespace();
        while !self.is_eof() && self.peek() != Some(']') {
            values.push(self.parse_value()?);
            if !self.eat(',') {
                break;
            }
            self.skip_whitespace();
        }

        if !self.eat(']') {
            return self.fail("expected `]`");
        }
        self.depth -= 1;
        Some(values)
    }

    /// Object body; the opening brace has been consumed.
    fn parse_object(&mut self) -> Option<Object> {
        self.enter()?;
        let mut object = Object::new();

        self.skip_whitespace();
        while !self.is_eof() && self.peek() != Some('}') {
            if !self.eat('"') {
                return self.fail("expected key");
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if !self.eat(':') {
                return self.fail("expected `:`");
            }
            let value = self.parse_value()?;
            if !object.set(key, value) {
                return self.fail("duplicate key");
            }
            if !self.eat(',') {
                break;
            }
            self.skip_whitespace();
        }

        self.skip_whitespace();
        if !self.eat('}') {
            return self.fail("expected `}`");
        }
        self.depth -= 1;
        Some(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> f64 {
        parse(text).unwrap_or_else(|| panic!("{text} should parse")).expect_number()
    }

    #[test]
    fn literals() {
        assert_eq!(parse("true"), Some(Value::Bool(true)));
        assert_eq!(parse(" false "), Some(Value::Bool(false)));
        assert_eq!(parse("\tnull\r\n"), Some(Value::Null));
        assert_eq!(parse("nul"), None);
        assert_eq!(parse("True"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn empty_containers() {
        assert_eq!(parse("{}"), Some(Value::Object(Object::new())));
        assert_eq!(parse("[]"), Some(Value::Array(Array::new())));
        assert_eq!(parse("[ ]"), Some(Value::Array(Array::new())));
        assert_eq!(parse("{ }"), Some(Value::Object(Object::new())));
    }

    #[test]
    fn trailing_commas_are_accepted() {
        let arr = parse("[1,2,]").unwrap();
        assert_eq!(arr.expect_array(), &vec![Value::Number(1.0), Value::Number(2.0)]);

        let obj = parse("{\"a\":1,}").unwrap();
        assert_eq!(obj.expect_object().len(), 1);
        assert_eq!(obj.expect_object().expect("a"), &Value::Number(1.0));

        assert!(parse("[ 1 , ]").is_some());
        assert!(parse("[,]").is_none());
        assert!(parse("[1,,]").is_none());
        assert!(parse("{,}").is_none());
    }

    #[test]
    fn separators_are_required() {
        assert!(parse("[1 2]").is_none());
        assert!(parse("{\"a\":1 \"b\":2}").is_none());
        assert!(parse("{\"a\" 1}").is_none());
        assert!(parse("[1").is_none());
        assert!(parse("{\"a\":1").is_none());
        assert!(parse("{a:1}").is_none());
    }

    #[test]
    fn duplicate_keys_fail_the_whole_parse() {
        assert!(parse("{\"a\":1,\"a\":2}").is_none());
        assert!(parse("[{\"k\":{\"x\":1,\"x\":1}}]").is_none());
        // Keys compare after unescaping.
        assert!(parse("{\"a\":1,\"\\u0061\":2}").is_none());
    }

    #[test]
    fn object_preserves_key_order() {
        let value = parse("{\"z\":1,\"a\":2,\"m\":3}").unwrap();
        let keys: Vec<String> = value.expect_object().keys().map(JsonString::to_string_lossy).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn integers_and_fractions() {
        assert_eq!(num("0"), 0.0);
        assert_eq!(num("42"), 42.0);
        assert_eq!(num("-17"), -17.0);
        assert_eq!(num("1.5"), 1.5);
        assert_eq!(num("1.05"), 1.05);
        assert_eq!(num("-0.25"), -0.25);
        assert_eq!(num("18446744073709551616"), 18_446_744_073_709_551_616.0);
    }

    #[test]
    fn exponent_raises_the_mantissa() {
        assert_eq!(num("2e3"), 8.0);
        assert_eq!(num("2E+3"), 8.0);
        assert!((num("10e-1") - 0.1).abs() < 1e-15);
        assert_eq!(num("-3e2"), -9.0);
        assert_eq!(num("1.5e2"), 2.25);
        assert_eq!(num("7e1"), 7.0);
    }

    #[test]
    fn malformed_numbers() {
        assert!(parse("-").is_none());
        assert!(parse("-a").is_none());
        assert!(parse("01").is_none());
        assert!(parse("1.").is_none());
        assert!(parse(".5").is_none());
        assert!(parse("1e").is_none());
        assert!(parse("1e+").is_none());
        assert!(parse("+1").is_none());
        assert!(parse("[01]").is_none());
    }

    #[test]
    fn simple_escapes() {
        let s = parse(r#""\"\\\/\b\f\n\r\t""#).unwrap();
        assert_eq!(s.expect_string().units(), &[0x22, 0x5C, 0x2F, 0x08, 0x0C, 0x0A, 0x0D, 0x09]);
    }

    #[test]
    fn unicode_escapes_are_single_code_units() {
        let s = parse("\"\\uFFFF\"").unwrap();
        assert_eq!(s.expect_string().units(), &[0xFFFF]);

        // A surrogate pair stays two separate units.
        let s = parse("\"\\ud83d\\uDE00\"").unwrap();
        assert_eq!(s.expect_string().units(), &[0xD83D, 0xDE00]);

        let s = parse("\"\\uD800\"").unwrap();
        assert_eq!(s.expect_string().units(), &[0xD800]);
    }

    #[test]
    fn bad_escapes() {
        assert!(parse("\"\\z\"").is_none());
        assert!(parse("\"\\u12\"").is_none());
        assert!(parse("\"\\u12G4\"").is_none());
        assert!(parse("\"\\").is_none());
        assert!(parse("\"abc").is_none());
    }

    #[test]
    fn non_ascii_is_transcoded_to_utf16() {
        let s = parse("\"h\u{e9}\u{1F600}\"").unwrap();
        assert_eq!(s.expect_string().units(), &[0x68, 0xE9, 0xD83D, 0xDE00]);
    }

    #[test]
    fn trailing_garbage_fails() {
        assert!(parse("{} x").is_none());
        assert!(parse("1 2").is_none());
        assert!(parse("truex").is_none());
        assert!(parse("[1]\n").is_some());
    }

    #[test]
    fn nested_structures() {
        let value = parse(r#"{"a":[1,{"b":null},[true,"x"]],"c":{}}"#).unwrap();
        let a = value.expect_object().expect("a").expect_array();
        assert_eq!(a.len(), 3);
        assert!(a[1].expect_object().expect("b").is_null());
        assert_eq!(a[2].expect_array()[1].expect_string(), "x");
    }

    #[test]
    fn depth_limit() {
        let limits = ParserLimits { max_depth: 3 };
        assert!(parse_with_limits("[[[1]]]", limits).is_some());
        assert!(parse_with_limits("[[[[1]]]]", limits).is_none());
        assert!(parse_with_limits("{\"a\":{\"b\":{\"c\":{}}}}", limits).is_none());

        let deep = "[".repeat(10_000) + &"]".repeat(10_000);
        assert!(parse(&deep).is_none());
    }
}
