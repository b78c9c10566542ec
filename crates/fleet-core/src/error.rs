//! Error types for the fleet tracking system

use thiserror::Error;

/// Core error type for the fleet tracking system
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    #[error("Driver already registered: {0}")]
    DuplicateDriver(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn driver_not_found(name: impl Into<String>) -> Self {
        Self::DriverNotFound(name.into())
    }

    pub fn duplicate_driver(name: impl Into<String>) -> Self {
        Self::DuplicateDriver(name.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
