//! Heart rate to metabolic rate.

/// Convert heart rate (bpm) to a metabolic rate category in met.
///
/// A coarse step function:
/// - below 60 bpm: 1.0 (resting)
/// - 60 to 99 bpm: 1.5 (light activity)
/// - 100 to 139 bpm: 2.0 (moderate activity)
/// - 140 bpm and above: 3.0 (heavy activity)
pub fn heart_rate_to_met(heart_rate: f64) -> f64 {
    if heart_rate < 60.0 {
        1.0
    } else if heart_rate < 100.0 {
        1.5
    } else if heart_rate < 140.0 {
        2.0
    } else {
        3.0
    }
}
