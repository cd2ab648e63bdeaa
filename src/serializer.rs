//! JSON encoding for the document, with a configurable indent width.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Indent used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Widest indent written, in spaces. Wider requests are clamped.
pub const MAX_INDENT: usize = 10;

/// Converts the document to and from bytes.
///
/// An indent of `0` produces compact single-line JSON; anything else
/// pretty-prints with that many spaces per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSerializer {
    indent: usize,
}

impl JsonSerializer {
    /// Serializer using `indent` spaces per level.
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    /// Spaces per nesting level.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Encode `value` as UTF-8 JSON text.
    pub fn serialize(&self, value: &Value) -> Result<Vec<u8>> {
        if self.indent == 0 {
            return serde_json::to_vec(value).map_err(Error::from);
        }
        let pad = vec![b' '; self.indent];
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&pad));
        value
            .serialize(&mut ser)
            .map_err(|e| Error::Serialize(e.to_string()))?;
        Ok(out)
    }

    /// Decode UTF-8 JSON text. Anything that isn't valid UTF-8 or valid JSON
    /// is a [`Error::Parse`].
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Value> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::Parse(e.to_string()))?;
        serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_indent_is_four_spaces() {
        let bytes = JsonSerializer::default()
            .serialize(&json!({"a": 1, "list": ["x", "y"]}))
            .unwrap();
        let expected = "{\n    \"a\": 1,\n    \"list\": [\n        \"x\",\n        \"y\"\n    ]\n}";
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn zero_indent_is_compact() {
        let bytes = JsonSerializer::new(0)
            .serialize(&json!({"a": [1, 2]}))
            .unwrap();
        assert_eq!(bytes, br#"{"a":[1,2]}"#);
    }

    #[test]
    fn custom_indent() {
        let bytes = JsonSerializer::new(2).serialize(&json!({"k": true})).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"k\": true\n}");
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let bytes = JsonSerializer::default()
            .serialize(&json!({"a": [], "b": {}}))
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n    \"a\": [],\n    \"b\": {}\n}"
        );
    }

    #[test]
    fn keys_keep_insertion_order() {
        let bytes = JsonSerializer::new(0)
            .serialize(&json!({"zeta": 1, "alpha": 2}))
            .unwrap();
        assert_eq!(bytes, br#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = JsonSerializer::default().deserialize(b"{ not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let err = JsonSerializer::default().deserialize(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn empty_input_is_parse_error() {
        let err = JsonSerializer::default().deserialize(b"").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
