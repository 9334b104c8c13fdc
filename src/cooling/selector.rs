//! Mapping from a required air velocity to a discrete fan speed.

use serde::Serialize;

use super::catalog::{self, FanOperatingPoint};
use crate::config::FAN_PREFERENCE_ORDER;
use crate::error::{ComfortError, Result};

/// Fan setting chosen for a required velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FanRecommendation {
    pub rpm: u16,
    pub speed_level: u8,
    /// Velocity the chosen setting delivers, in m/s.
    pub achieved_velocity: f64,
}

impl From<&FanOperatingPoint> for FanRecommendation {
    fn from(point: &FanOperatingPoint) -> Self {
        Self {
            rpm: point.rpm,
            speed_level: point.speed_level,
            achieved_velocity: point.velocity(),
        }
    }
}

/// Pick a fan speed that delivers at least `required_velocity` m/s.
///
/// Candidates are tried in [`FAN_PREFERENCE_ORDER`] and the first one that
/// is fast enough wins. This is not the slowest sufficient speed: a
/// request that speed 1 could satisfy still gets speed 3, because mid-range
/// speeds are preferred for noise and draft.
///
/// # Errors
/// [`ComfortError::NoFeasibleFanSpeed`] when even the fastest setting is
/// too slow.
pub fn select_fan_speed(required_velocity: f64) -> Result<FanRecommendation> {
    FAN_PREFERENCE_ORDER
        .iter()
        .filter_map(|&rpm| catalog::lookup(rpm))
        .find(|point| point.velocity() >= required_velocity)
        .map(FanRecommendation::from)
        .ok_or(ComfortError::NoFeasibleFanSpeed {
            required: required_velocity,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FAN_CATALOG;
    use proptest::prelude::*;

    #[test]
    fn test_low_velocity_prefers_speed_three() {
        // Every setting qualifies; the first preference wins.
        let rec = select_fan_speed(0.5).unwrap();
        assert_eq!(rec.rpm, 210);
        assert_eq!(rec.speed_level, 3);
    }

    #[test]
    fn test_not_minimum_sufficient() {
        // 120 RPM (1.47 m/s) would be enough, but 210 RPM comes first.
        let rec = select_fan_speed(1.4).unwrap();
        assert_eq!(rec.rpm, 210);
    }

    #[test]
    fn test_falls_through_preference_order() {
        assert_eq!(select_fan_speed(2.5).unwrap().rpm, 250);
        assert_eq!(select_fan_speed(2.9).unwrap().rpm, 295);
        assert_eq!(select_fan_speed(3.15).unwrap().rpm, 335);
    }

    #[test]
    fn test_exact_threshold_is_sufficient() {
        let speed_four = catalog::lookup(250).unwrap().velocity();
        let rec = select_fan_speed(speed_four).unwrap();
        assert_eq!(rec.rpm, 250);
        assert_eq!(rec.achieved_velocity, speed_four);
    }

    #[test]
    fn test_above_catalog_maximum() {
        let err = select_fan_speed(3.2).unwrap_err();
        assert!(matches!(err, ComfortError::NoFeasibleFanSpeed { .. }));
    }

    #[test]
    fn test_nan_is_infeasible() {
        assert!(select_fan_speed(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_first_sufficient_in_preference_order(required in 0.0f64..3.2) {
            prop_assume!(required > 0.0);
            let expected = FAN_PREFERENCE_ORDER.iter().copied().find(|&rpm| {
                FAN_CATALOG
                    .iter()
                    .any(|p| p.rpm == rpm && p.velocity() >= required)
            });

            match (select_fan_speed(required), expected) {
                (Ok(rec), Some(rpm)) => {
                    prop_assert_eq!(rec.rpm, rpm);
                    prop_assert!(rec.achieved_velocity >= required);
                }
                (Err(ComfortError::NoFeasibleFanSpeed { .. }), None) => {}
                (got, want) => prop_assert!(false, "got {:?}, expected {:?}", got, want),
            }
        }
    }
}
