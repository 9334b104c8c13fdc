//! AC + Ceiling Fan Comfort Advisor
//!
//! Recommends an air-conditioner setpoint and a ceiling fan speed that
//! together give a desired "feels-like" temperature, using the Predicted
//! Mean Vote (PMV) thermal comfort model.
//!
//! # Features
//!
//! - Estimate metabolic rate from heart rate and insulation from clothing
//! - Exhaustive PMV search over AC temperature and air velocity
//! - Map the required air velocity to one of six fan speeds
//! - Export the full search trace as CSV
//!
//! # Example
//!
//! ```no_run
//! use ac_fan_comfort::{ComfortOutcome, ComfortRequest, ComfortSettingsCalculator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let calculator = ComfortSettingsCalculator::new();
//!     let request = ComfortRequest::new(24.0, 30.0, 60.0, 85.0, "summer clothing");
//!
//!     match calculator.calculate(&request)? {
//!         ComfortOutcome::Recommendation(rec) => {
//!             println!("AC {:.1}°C, fan speed {}", rec.ac_temp, rec.fan.speed_level);
//!         }
//!         ComfortOutcome::Advisory(advisory) => println!("{}", advisory),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod calculator;
pub mod comfort;
pub mod config;
pub mod cooling;
pub mod error;
pub mod physiology;
pub mod storage;
pub mod utils;

// Re-exports for convenience
pub use calculator::{
    ComfortOutcome, ComfortRecommendation, ComfortRequest, ComfortSettingsCalculator,
    HumidityAdvisory,
};
pub use comfort::{ComfortGridSearch, Iso7730Pmv, LookupTable, PmvModel};
pub use cooling::{FanRecommendation, select_fan_speed};
pub use error::{ComfortError, Result};
pub use storage::AppConfig;
