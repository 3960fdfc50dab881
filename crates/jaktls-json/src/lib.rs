//! JSON value model, parser and serializer for jaktls.
//!
//! The wire model follows the Language Server Protocol's convention of
//! UTF-16 strings, so [`JsonString`] stores code units rather than UTF-8.
//!
//! - [`Value`]: closed sum over null, bool, number, string, array, object
//! - [`Object`]: insertion-ordered map that refuses duplicate keys
//! - [`parse`]: single-pass recursive descent, all-or-nothing
//! - [`Value::to_json_string`] / `Display`: compact serialization
//!
//! # Grammar notes
//!
//! The parser tolerates one trailing comma before `]` or `}`. Exponents are
//! applied as a power of the mantissa (`2e3` is `8`), not as a base-10
//! scale; see [`parser`] for details.
//!
//! ```
//! use jaktls_json::{parse, Value};
//!
//! let value = parse(r#"{"b":[1,2,],"a":"x"}"#).unwrap();
//! assert_eq!(value.to_json_string(), r#"{"b":[1,2],"a":"x"}"#);
//! assert!(parse("[1 2]").is_none());
//! ```

#![forbid(unsafe_code)]

pub mod parser;
mod serializer;
mod string;
mod value;

pub use parser::{Parser, ParserLimits, parse, parse_with_limits};
pub use string::JsonString;
pub use value::{Array, Kind, Object, Value};
