//! Occupant estimates: metabolic rate from heart rate and clothing
//! insulation from a clothing descriptor.

mod clothing;
mod metabolic;

use serde::Serialize;

pub use clothing::{clothing_descriptors, clothing_to_clo, lookup_clothing};
pub use metabolic::heart_rate_to_met;

/// Occupant inputs to the PMV model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysiologicalParams {
    /// Metabolic rate in met.
    pub met: f64,
    /// Clothing insulation in clo.
    pub clo: f64,
}

impl PhysiologicalParams {
    pub fn estimate(heart_rate: f64, clothing: &str) -> Self {
        Self {
            met: heart_rate_to_met(heart_rate),
            clo: clothing_to_clo(clothing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate() {
        let params = PhysiologicalParams::estimate(85.0, "summer clothing");
        assert_eq!(params.met, 1.5);
        assert_eq!(params.clo, 0.5);
    }
}
