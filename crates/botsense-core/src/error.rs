use thiserror::Error;

/// Top-level error type for the Botsense system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// BotsenseError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BotsenseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for BotsenseError {
    fn from(err: toml::de::Error) -> Self {
        BotsenseError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for BotsenseError {
    fn from(err: toml::ser::Error) -> Self {
        BotsenseError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for BotsenseError {
    fn from(err: serde_json::Error) -> Self {
        BotsenseError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Botsense operations.
pub type Result<T> = std::result::Result<T, BotsenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BotsenseError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = BotsenseError::Storage("connection refused".to_string());
        assert_eq!(err.to_string(), "Storage error: connection refused");

        let err = BotsenseError::Classification("no strategy".to_string());
        assert_eq!(err.to_string(), "Classification error: no strategy");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BotsenseError = io_err.into();
        assert!(matches!(err, BotsenseError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: BotsenseError = parsed.unwrap_err().into();
        assert!(matches!(err, BotsenseError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        let err: BotsenseError = parsed.unwrap_err().into();
        assert!(matches!(err, BotsenseError::Serialization(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(BotsenseError::Api("fail".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_debug_impl() {
        let err = BotsenseError::Generation("backend down".to_string());
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("Generation"));
        assert!(dbg.contains("backend down"));
    }
}
