//! Configuration error types

use std::fmt;
use std::io;

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// Config file could not be read
    Unreadable,
    /// Config file is not valid JSON for the config shape
    Malformed,
    /// A value is outside its permitted range
    Invalid,
}

impl ConfigErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreadable => "PAGER_CONFIG_UNREADABLE",
            Self::Malformed => "PAGER_CONFIG_MALFORMED",
            Self::Invalid => "PAGER_CONFIG_INVALID",
        }
    }
}

impl fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
}

impl ConfigError {
    /// Create a new config error
    pub fn new(code: ConfigErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Value outside its permitted range
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::new(ConfigErrorCode::Invalid, msg)
    }

    /// Get the error code
    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::new(
            ConfigErrorCode::Unreadable,
            format!("Failed to read config: {}", e),
        )
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(
            ConfigErrorCode::Malformed,
            format!("Invalid config JSON: {}", e),
        )
    }
}

/// Config result type
pub type ConfigResult<T> = Result<T, ConfigError>;
