// src/utils/error.rs
use std::io;
use thiserror::Error;

/// Main error type for the mining engine
///
/// Every error is reported synchronously, before any worker thread is
/// spawned, or when a finished session is joined. Nothing is surfaced
/// from inside a running search loop.
#[derive(Error, Debug)]
pub enum MinerError {
    /// Invalid thread count, zero difficulty or a bad configuration file
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The operating system random source could not seed the nonce generator
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A worker thread could not be spawned or panicked while mining
    #[error("Worker thread error: {0}")]
    ThreadError(String),
}

/// Converts random source failures into MinerError
///
/// Only raised while building a coordinator, when the default nonce
/// generator is seeded from operating system entropy.
impl From<rand::Error> for MinerError {
    fn from(e: rand::Error) -> Self {
        MinerError::InitializationError(format!("Random source unavailable: {}", e))
    }
}

/// Converts TOML parse errors into MinerError
impl From<toml::de::Error> for MinerError {
    fn from(e: toml::de::Error) -> Self {
        MinerError::ConfigError(format!("Invalid config format: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = MinerError::ConfigError("threads must be >= 0, got -1".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: threads must be >= 0, got -1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: MinerError = io_err.into();
        assert!(matches!(err, MinerError::IoError(_)));
    }

    #[test]
    fn test_rand_error_becomes_initialization_error() {
        let rand_err = rand::Error::new(io::Error::other("no entropy"));
        let err: MinerError = rand_err.into();
        assert!(matches!(err, MinerError::InitializationError(_)));
        assert_eq!(
            err.to_string(),
            "Initialization error: Random source unavailable: no entropy"
        );
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let parse_err = toml::from_str::<toml::Value>("threads = = 1").unwrap_err();
        let err: MinerError = parse_err.into();
        assert!(matches!(err, MinerError::ConfigError(_)));
    }
}
