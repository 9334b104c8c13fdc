//! Exhaustive search for the (AC temperature, air velocity) pair whose PMV
//! is closest to the target.
//!
//! The grid is walked velocity-descending (outer) and AC-temperature
//! descending (inner). On equal deviation the earlier cell is kept, so the
//! walk order decides ties: faster air wins over a cooler setpoint.

use serde::Serialize;

use super::pmv::{Iso7730Pmv, PmvInputs, PmvModel};
use crate::config::SearchParams;
use crate::error::{ComfortError, Result};

/// Tolerance, in step units, for including an axis end point.
const AXIS_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of cells evaluated by one search.
pub const MAX_GRID_CELLS: usize = 250_000;

/// Conditions for a single search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortConditions {
    /// Desired feels-like temperature in °C. Also the coolest AC setpoint tried.
    pub desired_temp: f64,
    /// Outdoor temperature in °C. Not a PMV input.
    pub outdoor_temp: f64,
    /// Outdoor relative humidity in %, used as the indoor humidity.
    pub outdoor_humidity: f64,
    pub met: f64,
    pub clo: f64,
}

/// One evaluated grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PmvSample {
    pub ac_temp: f64,
    pub air_velocity: f64,
    pub pmv: f64,
}

impl PmvSample {
    /// Absolute distance from a target PMV.
    pub fn deviation(&self, target_pmv: f64) -> f64 {
        (self.pmv - target_pmv).abs()
    }
}

/// The sample closest to the target PMV.
pub type OptimalSetting = PmvSample;

/// Every evaluated sample in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupTable {
    samples: Vec<PmvSample>,
}

impl LookupTable {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PmvSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a PmvSample;
    type IntoIter = std::slice::Iter<'a, PmvSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl FromIterator<PmvSample> for LookupTable {
    fn from_iter<I: IntoIterator<Item = PmvSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub target_pmv: f64,
    pub optimal: OptimalSetting,
    pub lookup_table: LookupTable,
}

// =============================================================================
// Grid
// =============================================================================

/// The two discretized axes of the search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGrid {
    /// From `init_ac_temp` down to the desired temperature.
    ac_temps: Vec<f64>,
    /// From `velocity_min` up to `velocity_max`.
    velocities: Vec<f64>,
}

impl SearchGrid {
    /// Build both axes.
    ///
    /// # Errors
    /// [`ComfortError::InvalidConfig`] if the grid would exceed
    /// [`MAX_GRID_CELLS`].
    pub fn new(params: &SearchParams, desired_temp: f64) -> Result<Self> {
        let ac_len = axis_len(params.init_ac_temp, desired_temp, -params.ac_temp_step)?;
        let velocity_len =
            axis_len(params.velocity_min, params.velocity_max, params.velocity_step)?;
        match ac_len.checked_mul(velocity_len) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(ComfortError::InvalidConfig(format!(
                    "search grid of {} AC temps x {} velocities exceeds {} cells",
                    ac_len, velocity_len, MAX_GRID_CELLS
                )));
            }
        }

        Ok(Self {
            ac_temps: axis(params.init_ac_temp, -params.ac_temp_step, ac_len),
            velocities: axis(params.velocity_min, params.velocity_step, velocity_len),
        })
    }

    pub fn ac_temps(&self) -> &[f64] {
        &self.ac_temps
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Number of cells, `|ac axis| * |velocity axis|`.
    pub fn cell_count(&self) -> usize {
        self.ac_temps.len() * self.velocities.len()
    }

    /// Cells as `(ac_temp, air_velocity)` in search order.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.velocities
            .iter()
            .rev()
            .flat_map(move |&velocity| self.ac_temps.iter().map(move |&ac| (ac, velocity)))
    }
}

/// Number of points in the inclusive range from `start` towards `end` in
/// `step` increments. Zero when `end` lies behind `start`.
///
/// # Errors
/// [`ComfortError::InvalidConfig`] if the range alone holds more than
/// [`MAX_GRID_CELLS`] points.
pub fn axis_len(start: f64, end: f64, step: f64) -> Result<usize> {
    if step == 0.0 || !step.is_finite() {
        return Ok(0);
    }
    let span = (end - start) / step;
    if span.is_nan() || span < -AXIS_TOLERANCE {
        return Ok(0);
    }
    if span >= MAX_GRID_CELLS as f64 {
        return Err(ComfortError::InvalidConfig(format!(
            "axis from {} to {} in steps of {} has more than {} points",
            start, end, step, MAX_GRID_CELLS
        )));
    }
    Ok((span + AXIS_TOLERANCE).floor() as usize + 1)
}

/// `len` values from `start` in `step` increments.
///
/// Values are computed by index so rounding error does not accumulate, then
/// snapped to 1e-9 so 0.1 + 2 * 0.1 reads back as 0.3.
fn axis(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| snap(start + i as f64 * step)).collect()
}

fn snap(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

// =============================================================================
// Search
// =============================================================================

/// Grid search over AC setpoint and air velocity.
#[derive(Debug, Clone, Default)]
pub struct ComfortGridSearch<M = Iso7730Pmv> {
    params: SearchParams,
    model: M,
}

impl<M: PmvModel> ComfortGridSearch<M> {
    pub fn new(params: SearchParams, model: M) -> Self {
        Self { params, model }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn grid(&self, desired_temp: f64) -> Result<SearchGrid> {
        SearchGrid::new(&self.params, desired_temp)
    }

    /// Evaluate one cell. Mean radiant temperature is taken equal to the
    /// AC temperature.
    pub fn evaluate(
        &self,
        conditions: &ComfortConditions,
        ac_temp: f64,
        air_velocity: f64,
    ) -> Result<PmvSample> {
        let inputs = PmvInputs {
            air_temp: ac_temp,
            mean_radiant_temp: ac_temp,
            relative_velocity: air_velocity,
            relative_humidity: conditions.outdoor_humidity,
            met: conditions.met,
            clo: conditions.clo,
        };
        let pmv = self.model.pmv(&inputs)?;
        if !pmv.is_finite() {
            return Err(ComfortError::PmvComputation {
                ac_temp,
                air_velocity,
                reason: format!("model returned non-finite value {}", pmv),
            });
        }
        Ok(PmvSample {
            ac_temp,
            air_velocity,
            pmv,
        })
    }

    /// Lazy sequence of evaluated samples in search order.
    pub fn samples<'a>(
        &'a self,
        grid: &'a SearchGrid,
        conditions: &'a ComfortConditions,
    ) -> impl Iterator<Item = Result<PmvSample>> + 'a {
        grid.cells()
            .map(move |(ac, velocity)| self.evaluate(conditions, ac, velocity))
    }

    /// Run the full search.
    ///
    /// # Errors
    /// - [`ComfortError::InvalidConfig`] if the grid is too large
    /// - [`ComfortError::EmptySearchSpace`] if either axis is empty
    /// - [`ComfortError::PmvComputation`] if any cell fails to evaluate
    pub fn search(&self, conditions: &ComfortConditions) -> Result<SearchOutcome> {
        let target_pmv = self.params.target_pmv(conditions.desired_temp);
        let grid = self.grid(conditions.desired_temp)?;

        log::debug!(
            "Searching {} AC temps x {} velocities for target PMV {:.2} (outdoor {}°C, RH {}%)",
            grid.ac_temps().len(),
            grid.velocities().len(),
            target_pmv,
            conditions.outdoor_temp,
            conditions.outdoor_humidity
        );

        let (optimal, samples) = self.samples(&grid, conditions).try_fold(
            (None, Vec::with_capacity(grid.cell_count())),
            |(best, mut samples), sample| {
                let sample = sample?;
                samples.push(sample);
                Ok::<_, ComfortError>((closer(best, sample, target_pmv), samples))
            },
        )?;

        let optimal = optimal.ok_or(ComfortError::EmptySearchSpace {
            desired: conditions.desired_temp,
            init_ac_temp: self.params.init_ac_temp,
        })?;

        Ok(SearchOutcome {
            target_pmv,
            optimal,
            lookup_table: LookupTable { samples },
        })
    }
}

/// Keep the incumbent unless the candidate is strictly closer.
fn closer(best: Option<PmvSample>, candidate: PmvSample, target_pmv: f64) -> Option<PmvSample> {
    match best {
        Some(best) if best.deviation(target_pmv) <= candidate.deviation(target_pmv) => Some(best),
        _ => Some(candidate),
    }
}
