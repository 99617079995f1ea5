//! Error types for Mudra

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Mudra error types
///
/// The quantizer, debouncer and both sessions are total and never produce
/// one of these; errors come from the shell around them (device discovery,
/// library lookups, user input, configuration and trace files).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No sensor connected within the discovery timeout
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Gesture name lookup miss
    #[error("Gesture not found: {0}")]
    NotFound(String),

    /// Malformed user input (menu choice, number, gesture name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Trace file encoding or format error
    #[error("Trace error: {0}")]
    Trace(String),

    /// JSON export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Error::Trace(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("wave".to_string());
        assert_eq!(err.to_string(), "Gesture not found: wave");

        let err = Error::DeviceUnavailable("no armband after 10000 ms".to_string());
        assert_eq!(
            err.to_string(),
            "Device unavailable: no armband after 10000 ms"
        );
    }

    #[test]
    fn test_from_toml_error() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
