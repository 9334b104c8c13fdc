//! Comfort settings calculator.
//!
//! Validates a request, estimates the occupant's met and clo, runs the
//! grid search and picks a fan speed for the winning air velocity.

use serde::Serialize;

use crate::comfort::{ComfortConditions, ComfortGridSearch, Iso7730Pmv, LookupTable, PmvModel};
use crate::config::{RequestLimits, SearchParams};
use crate::cooling::{self, FanRecommendation};
use crate::error::{ComfortError, Result};
use crate::physiology::PhysiologicalParams;
use crate::storage::AppConfig;

// =============================================================================
// Request / Outcome
// =============================================================================

/// What the occupant wants and the conditions they are in.
#[derive(Debug, Clone, PartialEq)]
pub struct ComfortRequest {
    /// Desired feels-like temperature in °C.
    pub desired_temp: f64,
    pub outdoor_temp: f64,
    /// Outdoor relative humidity in %.
    pub outdoor_humidity: f64,
    /// Heart rate in bpm.
    pub heart_rate: f64,
    /// Clothing descriptor, e.g. "summer clothing".
    pub clothing: String,
}

impl ComfortRequest {
    pub fn new(
        desired_temp: f64,
        outdoor_temp: f64,
        outdoor_humidity: f64,
        heart_rate: f64,
        clothing: impl Into<String>,
    ) -> Self {
        Self {
            desired_temp,
            outdoor_temp,
            outdoor_humidity,
            heart_rate,
            clothing: clothing.into(),
        }
    }

    fn check_finite(&self) -> Result<()> {
        let fields = [
            ("desired_temp", self.desired_temp),
            ("outdoor_temp", self.outdoor_temp),
            ("outdoor_humidity", self.outdoor_humidity),
            ("heart_rate", self.heart_rate),
        ];
        match fields.iter().find(|(_, v)| !v.is_finite()) {
            Some(&(field, _)) => Err(ComfortError::NonFiniteInput { field }),
            None => Ok(()),
        }
    }
}

/// Humid air makes the fan less effective; the user is told to set the AC
/// directly instead. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumidityAdvisory {
    pub outdoor_humidity: f64,
    pub threshold: f64,
}

impl std::fmt::Display for HumidityAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Warning: outdoor humidity {:.0}% is above {:.0}%. It is better to directly set \
             the AC to the desired temperature instead of cooling with fan air velocity.",
            self.outdoor_humidity, self.threshold
        )
    }
}

/// Recommended AC setpoint and fan speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComfortRecommendation {
    pub desired_temp: f64,
    /// AC setpoint in °C.
    pub ac_temp: f64,
    /// Air velocity the search asked for, in m/s.
    pub required_velocity: f64,
    pub fan: FanRecommendation,
    /// PMV at the recommended setpoint and required velocity.
    pub achieved_pmv: f64,
    pub target_pmv: f64,
    pub met: f64,
    pub clo: f64,
    #[serde(skip)]
    pub lookup_table: LookupTable,
}

impl std::fmt::Display for ComfortRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "To achieve a feels-like temperature of {:.1}°C:",
            self.desired_temp
        )?;
        writeln!(f, "- Set the AC temperature to {:.1}°C", self.ac_temp)?;
        writeln!(
            f,
            "- Set the fan speed to Speed {} ({} RPM)",
            self.fan.speed_level, self.fan.rpm
        )?;
        writeln!(f, "Required air velocity: {:.2} m/s", self.required_velocity)?;
        writeln!(
            f,
            "Fan air velocity: {:.2} m/s",
            self.fan.achieved_velocity
        )?;
        writeln!(
            f,
            "Final PMV with AC and fan combination: {:.2}",
            self.achieved_pmv
        )?;
        writeln!(f, "Metabolic rate (met): {:.2}", self.met)?;
        write!(f, "Clothing insulation (clo): {:.2}", self.clo)
    }
}

/// Successful result of a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComfortOutcome {
    Recommendation(ComfortRecommendation),
    Advisory(HumidityAdvisory),
}

impl ComfortOutcome {
    pub fn recommendation(&self) -> Option<&ComfortRecommendation> {
        match self {
            ComfortOutcome::Recommendation(rec) => Some(rec),
            ComfortOutcome::Advisory(_) => None,
        }
    }

    pub fn is_advisory(&self) -> bool {
        matches!(self, ComfortOutcome::Advisory(_))
    }
}

impl std::fmt::Display for ComfortOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComfortOutcome::Recommendation(rec) => write!(f, "{}", rec),
            ComfortOutcome::Advisory(advisory) => write!(f, "{}", advisory),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Turns a [`ComfortRequest`] into a [`ComfortOutcome`].
#[derive(Debug, Clone, Default)]
pub struct ComfortSettingsCalculator<M = Iso7730Pmv> {
    search: ComfortGridSearch<M>,
    limits: RequestLimits,
}

impl ComfortSettingsCalculator<Iso7730Pmv> {
    /// Calculator with the ISO 7730 model and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator using the ISO 7730 model and the given config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_model(config.search, config.limits, Iso7730Pmv::default())
    }
}

impl<M: PmvModel> ComfortSettingsCalculator<M> {
    pub fn with_model(params: SearchParams, limits: RequestLimits, model: M) -> Result<Self> {
        params.validate()?;
        limits.validate()?;
        Ok(Self {
            search: ComfortGridSearch::new(params, model),
            limits,
        })
    }

    pub fn params(&self) -> &SearchParams {
        self.search.params()
    }

    pub fn limits(&self) -> &RequestLimits {
        &self.limits
    }

    /// Check a request in order: finite numbers, desired temperature range,
    /// cooling only, then humidity.
    ///
    /// Returns `Ok(Some(advisory))` when humidity is too high to bother
    /// with the fan.
    pub fn validate(&self, request: &ComfortRequest) -> Result<Option<HumidityAdvisory>> {
        request.check_finite()?;

        let limits = &self.limits;
        if request.desired_temp < limits.min_desired_temp
            || request.desired_temp > limits.max_desired_temp
        {
            return Err(ComfortError::OutOfRangeTemperature {
                value: request.desired_temp,
                min: limits.min_desired_temp,
                max: limits.max_desired_temp,
            });
        }

        if request.outdoor_temp < request.desired_temp {
            return Err(ComfortError::HeatingNotSupported {
                outdoor: request.outdoor_temp,
                desired: request.desired_temp,
            });
        }

        if request.outdoor_humidity > limits.max_outdoor_humidity {
            log::warn!(
                "Outdoor humidity {}% above {}%, skipping fan recommendation",
                request.outdoor_humidity,
                limits.max_outdoor_humidity
            );
            return Ok(Some(HumidityAdvisory {
                outdoor_humidity: request.outdoor_humidity,
                threshold: limits.max_outdoor_humidity,
            }));
        }

        Ok(None)
    }

    /// Compute the recommended AC setpoint and fan speed.
    ///
    /// # Errors
    /// - input errors from [`validate`](Self::validate)
    /// - [`ComfortError::InvalidConfig`] if the grid would be too large
    /// - [`ComfortError::UnableToDetermineVelocity`] if the grid is empty
    /// - [`ComfortError::UnableToAchieveVelocity`] if the fan is too slow
    /// - [`ComfortError::PmvComputation`] if the model fails
    pub fn calculate(&self, request: &ComfortRequest) -> Result<ComfortOutcome> {
        if let Some(advisory) = self.validate(request)? {
            return Ok(ComfortOutcome::Advisory(advisory));
        }

        let physiology = PhysiologicalParams::estimate(request.heart_rate, &request.clothing);
        let conditions = ComfortConditions {
            desired_temp: request.desired_temp,
            outdoor_temp: request.outdoor_temp,
            outdoor_humidity: request.outdoor_humidity,
            met: physiology.met,
            clo: physiology.clo,
        };

        let outcome = self.search.search(&conditions).map_err(|e| match e {
            ComfortError::EmptySearchSpace { .. } => ComfortError::UnableToDetermineVelocity,
            other => other,
        })?;
        let optimal = outcome.optimal;

        let fan = cooling::select_fan_speed(optimal.air_velocity).map_err(|e| match e {
            ComfortError::NoFeasibleFanSpeed { required } => {
                ComfortError::UnableToAchieveVelocity {
                    required,
                    max_available: cooling::catalog::max_velocity(),
                }
            }
            other => other,
        })?;

        log::info!(
            "AC {:.1}°C + fan speed {} ({} RPM) for {:.2} m/s, PMV {:.2} (target {:.2})",
            optimal.ac_temp,
            fan.speed_level,
            fan.rpm,
            optimal.air_velocity,
            optimal.pmv,
            outcome.target_pmv
        );

        Ok(ComfortOutcome::Recommendation(ComfortRecommendation {
            desired_temp: request.desired_temp,
            ac_temp: optimal.ac_temp,
            required_velocity: optimal.air_velocity,
            fan,
            achieved_pmv: optimal.pmv,
            target_pmv: outcome.target_pmv,
            met: physiology.met,
            clo: physiology.clo,
            lookup_table: outcome.lookup_table,
        }))
    }
}
