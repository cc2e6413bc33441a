//! Error types for the label printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Printer refused the connection, is unreachable, or did not answer in time
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Connection stopped accepting data in the middle of a batch
    #[error("Write failed: {0}")]
    Write(String),

    /// A numeric run in a field could not be parsed or overflowed
    #[error("Invalid number '{0}'")]
    Format(String),

    /// No printer address given
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Printer address given but unusable (bad port)
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Label request does not fit the selected label size
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl PrintError {
    /// Whether the caller can recover by retrying with a corrected address.
    ///
    /// No document has been sent when this is true.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::InvalidConfig(_) | Self::InvalidAddress(_)
        )
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_recoverable() {
        assert!(PrintError::Connection("refused".into()).is_connection_error());
        assert!(PrintError::InvalidConfig("empty host".into()).is_connection_error());
        assert!(PrintError::InvalidAddress("10.0.0.1:abc".into()).is_connection_error());
        assert!(!PrintError::Write("broken pipe".into()).is_connection_error());
        assert!(!PrintError::Format("1.2.3".into()).is_connection_error());
    }

    #[test]
    fn test_error_messages() {
        let err = PrintError::Format("99x".into());
        assert_eq!(err.to_string(), "Invalid number '99x'");
    }
}
