//! Static tables and tunable parameters for the comfort advisor.
//!
//! The fan catalog, preference order and clothing map are fixed data.
//! The search and validation parameters can be overridden from the
//! config file (see [`crate::storage`]) but default to the values below.

use serde::{Deserialize, Serialize};

use crate::comfort::axis_len;
use crate::cooling::FanOperatingPoint;
use crate::error::{ComfortError, Result};

// =============================================================================
// Fan Catalog
// =============================================================================

/// Ceiling fan sweep diameter in meters (48 inch).
pub const FAN_SWEEP_DIAMETER_M: f64 = 1.2;

/// Rated operating points of the ceiling fan, ordered by speed level.
pub const FAN_CATALOG: [FanOperatingPoint; 6] = [
    FanOperatingPoint::new(120, 100.0, 1),
    FanOperatingPoint::new(165, 130.0, 2),
    FanOperatingPoint::new(210, 160.0, 3),
    FanOperatingPoint::new(250, 190.0, 4),
    FanOperatingPoint::new(295, 210.0, 5),
    FanOperatingPoint::new(335, 217.0, 6),
];

/// Order in which fan RPMs are tried: middle speeds (3, 4) first, then
/// the flanking speeds (2, 5), then the extremes (1, 6).
pub const FAN_PREFERENCE_ORDER: [u16; 6] = [210, 250, 165, 295, 120, 335];

// =============================================================================
// Clothing Insulation
// =============================================================================

/// Clothing descriptors and their insulation in clo (ASHRAE 55 values).
pub const CLOTHING_TABLE: [(&str, f64); 6] = [
    ("summer clothing", 0.5),
    ("winter clothing", 1.0),
    ("light blanket", 0.7),
    ("heavy blanket", 1.5),
    ("shirt and trousers", 0.6),
    ("sweater and trousers", 1.2),
];

/// Insulation used for descriptors not found in [`CLOTHING_TABLE`]
/// (same as summer clothing).
pub const DEFAULT_CLO: f64 = 0.5;

// =============================================================================
// Search Parameters
// =============================================================================

/// Grid definition and target heuristic for the comfort search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Feels-like temperature that maps to a neutral PMV of 0.
    #[serde(default = "default_pmv_baseline_temp")]
    pub pmv_baseline_temp: f64,

    /// PMV shift per degree of desired temperature.
    #[serde(default = "default_pmv_temp_sensitivity")]
    pub pmv_temp_sensitivity: f64,

    /// Warmest AC setpoint tried; the axis descends from here.
    #[serde(default = "default_init_ac_temp")]
    pub init_ac_temp: f64,

    #[serde(default = "default_ac_temp_step")]
    pub ac_temp_step: f64,

    #[serde(default = "default_velocity_min")]
    pub velocity_min: f64,

    #[serde(default = "default_velocity_max")]
    pub velocity_max: f64,

    #[serde(default = "default_velocity_step")]
    pub velocity_step: f64,
}

fn default_pmv_baseline_temp() -> f64 {
    24.0
}

fn default_pmv_temp_sensitivity() -> f64 {
    0.3
}

fn default_init_ac_temp() -> f64 {
    28.0
}

fn default_ac_temp_step() -> f64 {
    0.5
}

fn default_velocity_min() -> f64 {
    0.1
}

fn default_velocity_max() -> f64 {
    3.2
}

fn default_velocity_step() -> f64 {
    0.1
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            pmv_baseline_temp: default_pmv_baseline_temp(),
            pmv_temp_sensitivity: default_pmv_temp_sensitivity(),
            init_ac_temp: default_init_ac_temp(),
            ac_temp_step: default_ac_temp_step(),
            velocity_min: default_velocity_min(),
            velocity_max: default_velocity_max(),
            velocity_step: default_velocity_step(),
        }
    }
}

impl SearchParams {
    /// Target PMV for a desired feels-like temperature.
    ///
    /// This is a linear heuristic, not a physical derivation: the baseline
    /// temperature feels neutral and every degree away from it shifts the
    /// vote by `pmv_temp_sensitivity`.
    pub fn target_pmv(&self, desired_temp: f64) -> f64 {
        (desired_temp - self.pmv_baseline_temp) * self.pmv_temp_sensitivity
    }

    /// Same parameters with a different starting AC temperature.
    pub fn with_init_ac_temp(mut self, init_ac_temp: f64) -> Self {
        self.init_ac_temp = init_ac_temp;
        self
    }

    /// Reject values that would make the grid undefined.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pmv_baseline_temp", self.pmv_baseline_temp),
            ("pmv_temp_sensitivity", self.pmv_temp_sensitivity),
            ("init_ac_temp", self.init_ac_temp),
            ("ac_temp_step", self.ac_temp_step),
            ("velocity_min", self.velocity_min),
            ("velocity_max", self.velocity_max),
            ("velocity_step", self.velocity_step),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ComfortError::InvalidConfig(format!(
                "{} must be a finite number",
                name
            )));
        }

        if self.ac_temp_step <= 0.0 || self.velocity_step <= 0.0 {
            return Err(ComfortError::InvalidConfig(
                "grid steps must be greater than zero".into(),
            ));
        }

        if self.velocity_min < 0.0 {
            return Err(ComfortError::InvalidConfig(format!(
                "velocity_min {} must not be negative",
                self.velocity_min
            )));
        }

        // The AC axis depends on the request and is bounded per search.
        axis_len(self.velocity_min, self.velocity_max, self.velocity_step)?;

        Ok(())
    }
}

// =============================================================================
// Request Limits
// =============================================================================

/// Bounds applied to a comfort request before any computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestLimits {
    #[serde(default = "default_min_desired_temp")]
    pub min_desired_temp: f64,

    #[serde(default = "default_max_desired_temp")]
    pub max_desired_temp: f64,

    /// Above this outdoor humidity the advisor recommends plain AC instead.
    #[serde(default = "default_max_outdoor_humidity")]
    pub max_outdoor_humidity: f64,
}

fn default_min_desired_temp() -> f64 {
    16.0
}

fn default_max_desired_temp() -> f64 {
    32.0
}

fn default_max_outdoor_humidity() -> f64 {
    75.0
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            min_desired_temp: default_min_desired_temp(),
            max_desired_temp: default_max_desired_temp(),
            max_outdoor_humidity: default_max_outdoor_humidity(),
        }
    }
}

impl RequestLimits {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_desired_temp.is_finite()
            && self.max_desired_temp.is_finite()
            && self.max_outdoor_humidity.is_finite())
        {
            return Err(ComfortError::InvalidConfig(
                "request limits must be finite numbers".into(),
            ));
        }
        if self.min_desired_temp > self.max_desired_temp {
            return Err(ComfortError::InvalidConfig(format!(
                "min_desired_temp {} is above max_desired_temp {}",
                self.min_desired_temp, self.max_desired_temp
            )));
        }
        Ok(())
    }
}
