//! Ceiling fan module.
//!
//! Provides the fixed fan catalog, the velocity model below the fan and
//! the preference-ordered speed selection.

pub mod catalog;
mod selector;

pub use catalog::FanOperatingPoint;
pub use selector::{FanRecommendation, select_fan_speed};
