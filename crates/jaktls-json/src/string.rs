//! UTF-16 string storage.

use std::fmt;

/// An owned sequence of UTF-16 code units.
///
/// Code units are stored verbatim: a `\uD800` escape produces a lone
/// surrogate, which is representable here even though it is not valid
/// Unicode. Conversion back to `String` is lossy for such units.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonString(Vec<u16>);

impl JsonString {
    /// Creates an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps raw code units.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// The code units.
    #[must_use]
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Number of code units (not characters).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends one code unit.
    pub fn push_unit(&mut self, unit: u16) {
        self.0.push(unit);
    }

    /// Appends a character, as one or two code units.
    pub fn push_char(&mut self, ch: char) {
        let mut buf = [0u16; 2];
        self.0.extend_from_slice(ch.encode_utf16(&mut buf));
    }

    /// Compares against UTF-8 text without allocating.
    #[must_use]
    pub fn eq_str(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }

    /// Whether the string begins with the UTF-16 encoding of `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut units = self.0.iter().copied();
        prefix.encode_utf16().all(|p| units.next() == Some(p))
    }

    /// Decodes to a `String`, replacing unpaired surrogates with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Decodes to a `String`, or `None` if it holds unpaired surrogates.
    #[must_use]
    pub fn to_utf8(&self) -> Option<String> {
        String::from_utf16(&self.0).ok()
    }

    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }
}

impl From<&str> for JsonString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for JsonString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&String> for JsonString {
    fn from(s: &String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Vec<u16>> for JsonString {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.eq_str(other)
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.eq_str(other)
    }
}

impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in char::decode_utf16(self.0.iter().copied()) {
            write!(f, "{}", ch.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_utf16_code_units() {
        let s = JsonString::from("a\u{1F600}");
        assert_eq!(s.len(), 3);
        assert_eq!(s.units(), &[0x61, 0xD83D, 0xDE00]);
        assert_eq!(s.to_utf8().as_deref(), Some("a\u{1F600}"));
    }

    #[test]
    fn compares_with_str() {
        let s = JsonString::from("2.0");
        assert!(s.eq_str("2.0"));
        assert_eq!(s, "2.0");
        assert!(!s.eq_str("2.00"));
        assert!(!s.eq_str("2."));
        assert!(s.starts_with("2."));
        assert!(s.starts_with(""));
        assert!(!s.starts_with("2.0.1"));
    }

    #[test]
    fn lone_surrogates_decode_lossily() {
        let s = JsonString::from_units(vec![0x41, 0xD800]);
        assert_eq!(s.to_utf8(), None);
        assert_eq!(s.to_string_lossy(), "A\u{FFFD}");
        assert_eq!(s.to_string(), "A\u{FFFD}");
    }

    #[test]
    fn push_char_splits_astral_characters() {
        let mut s = JsonString::new();
        s.push_char('x');
        s.push_char('\u{10437}');
        s.push_unit(0x20);
        assert_eq!(s.units(), &[0x78, 0xD801, 0xDC37, 0x20]);
    }
}
