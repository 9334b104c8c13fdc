//! Custom error types for the comfort advisor.
//!
//! This module separates input validation failures, search failures and
//! PMV computation failures so callers can tell them apart. The humidity
//! advisory is deliberately *not* an error; see
//! [`ComfortOutcome`](crate::calculator::ComfortOutcome).

use thiserror::Error;

/// Main error type for comfort calculations.
#[derive(Error, Debug)]
pub enum ComfortError {
    /// Desired temperature outside the supported range.
    #[error("Desired temperature {value}°C is out of range. Valid range: {min}-{max}°C")]
    OutOfRangeTemperature { value: f64, min: f64, max: f64 },

    /// Outdoor air is cooler than the desired temperature.
    #[error(
        "Heating is not supported: outdoor temperature {outdoor}°C is below desired {desired}°C"
    )]
    HeatingNotSupported { outdoor: f64, desired: f64 },

    /// A numeric field was NaN or infinite.
    #[error("Input '{field}' must be a finite number")]
    NonFiniteInput { field: &'static str },

    /// Raw text could not be parsed as a number.
    #[error("Invalid input for {field}: '{input}'. Please enter a numeric value")]
    InvalidNumber { field: String, input: String },

    /// One of the grid axes contains no values.
    #[error("Empty search space: desired {desired}°C is above the initial AC temperature {init_ac_temp}°C")]
    EmptySearchSpace { desired: f64, init_ac_temp: f64 },

    /// No catalog fan speed reaches the required velocity.
    #[error("No fan speed reaches {required:.2} m/s")]
    NoFeasibleFanSpeed { required: f64 },

    /// The grid search produced no optimal setting.
    #[error("Unable to determine air velocity")]
    UnableToDetermineVelocity,

    /// The optimal velocity is beyond what the fan can deliver.
    #[error(
        "Unable to achieve {required:.2} m/s with available fan RPM settings (max {max_available:.2} m/s)"
    )]
    UnableToAchieveVelocity { required: f64, max_available: f64 },

    /// The PMV model failed or returned a non-finite value for a grid cell.
    #[error("PMV computation failed at {ac_temp}°C / {air_velocity} m/s: {reason}")]
    PmvComputation {
        ac_temp: f64,
        air_velocity: f64,
        reason: String,
    },

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Lookup table could not be written.
    #[error("Export failed: {0}")]
    Export(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComfortError {
    /// True for errors caused by the request itself rather than the search.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ComfortError::OutOfRangeTemperature { .. }
                | ComfortError::HeatingNotSupported { .. }
                | ComfortError::NonFiniteInput { .. }
                | ComfortError::InvalidNumber { .. }
        )
    }
}

/// Result type alias for comfort operations.
pub type Result<T> = std::result::Result<T, ComfortError>;
