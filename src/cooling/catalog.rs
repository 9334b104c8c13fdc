//! Ceiling fan operating points and the velocity model below the fan.
//!
//! Velocity directly under the fan is treated as quasi-steady uniform
//! downward flow: rated air delivery divided by the swept disc area.
//! Real fans have a non-uniform profile, but this figure is what speed
//! selection is based on.

use serde::Serialize;
use std::f64::consts::PI;

use crate::config::{FAN_CATALOG, FAN_SWEEP_DIAMETER_M};

/// One rated speed setting of the ceiling fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FanOperatingPoint {
    pub rpm: u16,
    /// Rated air delivery in m³/min.
    pub rated_air_delivery: f64,
    /// Regulator position, 1 (slowest) to 6 (fastest).
    pub speed_level: u8,
}

impl FanOperatingPoint {
    pub const fn new(rpm: u16, rated_air_delivery: f64, speed_level: u8) -> Self {
        Self {
            rpm,
            rated_air_delivery,
            speed_level,
        }
    }

    /// Air velocity in m/s directly below the fan at this setting.
    pub fn velocity(&self) -> f64 {
        velocity_below_fan(self.rated_air_delivery, FAN_SWEEP_DIAMETER_M)
    }
}

impl std::fmt::Display for FanOperatingPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Speed {} ({} RPM)", self.speed_level, self.rpm)
    }
}

/// Area swept by fan blades of the given diameter, in m².
pub fn swept_area(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

/// Air velocity below a fan.
///
/// # Arguments
/// * `rated_air_delivery` - Air delivery in m³/min
/// * `diameter` - Sweep diameter in meters
///
/// # Returns
/// Velocity in m/s
pub fn velocity_below_fan(rated_air_delivery: f64, diameter: f64) -> f64 {
    let delivery_m3_per_s = rated_air_delivery / 60.0;
    delivery_m3_per_s / swept_area(diameter)
}

/// The full catalog, slowest first.
pub fn catalog() -> &'static [FanOperatingPoint] {
    &FAN_CATALOG
}

/// Find the operating point for an RPM value.
pub fn lookup(rpm: u16) -> Option<&'static FanOperatingPoint> {
    FAN_CATALOG.iter().find(|p| p.rpm == rpm)
}

/// Highest velocity any catalog setting delivers.
pub fn max_velocity() -> f64 {
    FAN_CATALOG
        .iter()
        .map(FanOperatingPoint::velocity)
        .fold(0.0, f64::max)
}
