//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (read, write, rename).
    Io(String),
    /// The backing file does not hold valid JSON.
    Parse(String),
    /// Failed to encode a value or the document as JSON.
    Serialize(String),
    /// Bad configuration (invalid path, indent, etc.).
    Config(String),
    /// A value has the wrong shape for the requested operation, e.g. removing
    /// from something that isn't a list.
    Type(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Type(msg) => write!(f, "type error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() {
            Error::Parse(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_map_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        assert!(matches!(Error::from(err), Error::Parse(_)));
    }

    #[test]
    fn truncated_input_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();
        assert!(matches!(Error::from(err), Error::Parse(_)));
    }

    #[test]
    fn data_errors_map_to_serialize() {
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8], 1);
        let err = serde_json::to_value(bad).unwrap_err();
        assert!(matches!(Error::from(err), Error::Serialize(_)));
    }

    #[test]
    fn display_prefixes_kind() {
        assert_eq!(
            Error::Type("not a list".into()).to_string(),
            "type error: not a list"
        );
        assert_eq!(Error::Config("x".into()).to_string(), "config error: x");
    }
}
