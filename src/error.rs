//! Error types and handling for the evacuation engine

use thiserror::Error;

/// Main error type for the evacuation engine
#[derive(Error, Debug)]
pub enum EvacError {
    /// A value outside the accepted domain was passed to an operation
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The center exists but its coordinates are unknown
    #[error("No coordinates available for {name}")]
    MissingCoordinates { name: String },

    /// Center directory could not be built or read
    #[error("Directory error: {message}")]
    Directory { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl EvacError {
    /// Create a new invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn missing_coordinates<S: Into<String>>(name: S) -> Self {
        Self::MissingCoordinates { name: name.into() }
    }

    /// Create a new directory error
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EvacError::InvalidArgument { message } => format!("Invalid input: {message}"),
            EvacError::MissingCoordinates { name } => {
                format!("Location coordinates are not available for {name}.")
            }
            EvacError::Directory { .. } => {
                "Evacuation center list could not be loaded. Please check the directory source."
                    .to_string()
            }
            EvacError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            EvacError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = EvacError::invalid_argument("maximum must be positive");
        assert!(matches!(err, EvacError::InvalidArgument { .. }));

        let err = EvacError::directory("duplicate id 3");
        assert!(matches!(err, EvacError::Directory { .. }));

        let err = EvacError::missing_coordinates("Burnham Park Pavilion");
        assert_eq!(
            err.to_string(),
            "No coordinates available for Burnham Park Pavilion"
        );
    }

    #[test]
    fn test_user_messages() {
        let err = EvacError::invalid_argument("latitude 91 out of range");
        assert!(err.user_message().contains("latitude 91"));

        let err = EvacError::config("bad level");
        assert!(err.user_message().contains("Configuration error"));

        let err = EvacError::missing_coordinates("Gym");
        assert!(err.user_message().contains("Gym"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EvacError = io_err.into();
        assert!(matches!(err, EvacError::Io { .. }));
    }
}
