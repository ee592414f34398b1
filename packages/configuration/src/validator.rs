//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, PartialEq)]
pub enum SemanticValidationError {
    #[error("The {option} multiplier must be a finite number greater than zero, got: {value}")]
    InvalidMultiplier { option: &'static str, value: f64 },

    #[error("The randomization factor must be in the range [0, 1), got: {value}")]
    InvalidRandomizationFactor { value: f64 },

    #[error("The ratio limit must be a finite number greater than zero, got: {value}")]
    InvalidRatioLimit { value: f64 },

    #[error("The maximum upload rate must be at least 8 bits per second (one byte), got: {value}. Remove the option for an unlimited rate.")]
    MaxUploadRateBelowOneByte { value: u64 },

    #[error("The cleanup interval must be greater than zero when entity eviction is enabled.")]
    ZeroCleanupInterval,

    #[error("The version check is enabled but there is no URL to query.")]
    MissingVersionCheckUrl,
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
