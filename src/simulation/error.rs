//! Error type for building a simulation world.
//!
//! Stepping a valid world never fails, so construction is the only source
//! of caller-visible errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Shorthand result type for the simulation module.
pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(message.into())
    }
}
