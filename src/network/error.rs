//! Network error types

use thiserror::Error;

/// Failures raised by a [`NetworkStore`](crate::network::store::NetworkStore)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network not found: {project}/{name}")]
    NotFound { project: String, name: String },

    #[error("Network already exists: {project}/{name}")]
    AlreadyExists { project: String, name: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn not_found(project: &str, name: &str) -> Self {
        Self::NotFound {
            project: project.to_string(),
            name: name.to_string(),
        }
    }

    pub fn already_exists(project: &str, name: &str) -> Self {
        Self::AlreadyExists {
            project: project.to_string(),
            name: name.to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures returned by the loader and by drivers
#[derive(Debug, Error)]
pub enum NetworkError {
    /// No constructor is registered for the type
    #[error("Unknown network driver: {driver}")]
    UnknownDriver { driver: String },

    /// Store lookup failed. Passed through untouched.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Raised by a driver's name rules
    #[error("{message}")]
    InvalidName { message: String },

    /// Name rule failure as reported by `validate`
    #[error("Network name invalid: {source}")]
    NameInvalid {
        #[source]
        source: Box<NetworkError>,
    },

    #[error("Invalid value for network option \"{key}\": {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Missing required network option \"{key}\"")]
    MissingConfig { key: String },
}

impl NetworkError {
    pub fn unknown_driver(driver: &str) -> Self {
        Self::UnknownDriver {
            driver: driver.to_string(),
        }
    }

    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName {
            message: message.into(),
        }
    }

    pub fn name_invalid(source: NetworkError) -> Self {
        Self::NameInvalid {
            source: Box::new(source),
        }
    }

    pub fn invalid_config(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_config(key: &str) -> Self {
        Self::MissingConfig {
            key: key.to_string(),
        }
    }

    pub fn is_unknown_driver(&self) -> bool {
        matches!(self, Self::UnknownDriver { .. })
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
