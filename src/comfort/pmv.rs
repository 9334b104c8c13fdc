//! Predicted Mean Vote (PMV) thermal comfort model.
//!
//! The grid search only needs a PMV value per cell, so the model sits
//! behind [`PmvModel`]. [`Iso7730Pmv`] is the Fanger model from
//! ISO 7730 and is what the advisor uses by default.

use crate::error::{ComfortError, Result};

/// Maximum iterations when solving for clothing surface temperature.
const MAX_ITERATIONS: usize = 150;

/// Convergence tolerance on the scaled clothing surface temperature.
const CONVERGENCE_TOLERANCE: f64 = 0.00015;

/// W/m² per met.
const MET_TO_W_M2: f64 = 58.15;

/// Environmental and personal inputs to a PMV evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmvInputs {
    /// Dry bulb air temperature in °C.
    pub air_temp: f64,
    /// Mean radiant temperature in °C.
    pub mean_radiant_temp: f64,
    /// Relative air velocity in m/s.
    pub relative_velocity: f64,
    /// Relative humidity in %.
    pub relative_humidity: f64,
    /// Metabolic rate in met.
    pub met: f64,
    /// Clothing insulation in clo.
    pub clo: f64,
}

/// A thermal comfort model returning a PMV for the given conditions.
pub trait PmvModel {
    fn pmv(&self, inputs: &PmvInputs) -> Result<f64>;
}

impl<F> PmvModel for F
where
    F: Fn(&PmvInputs) -> f64,
{
    fn pmv(&self, inputs: &PmvInputs) -> Result<f64> {
        Ok(self(inputs))
    }
}

/// ISO 7730 Fanger PMV.
///
/// Inputs are not clamped to the standard's applicability ranges; the
/// advisor's velocity grid deliberately goes past 1 m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iso7730Pmv {
    /// External work in met, normally 0.
    pub external_work: f64,
}

impl Default for Iso7730Pmv {
    fn default() -> Self {
        Self { external_work: 0.0 }
    }
}

impl PmvModel for Iso7730Pmv {
    fn pmv(&self, inputs: &PmvInputs) -> Result<f64> {
        let tdb = inputs.air_temp;
        let tr = inputs.mean_radiant_temp;

        // Partial water vapour pressure, Pa
        let pa = inputs.relative_humidity * 10.0 * (16.6536 - 4030.183 / (tdb + 235.0)).exp();

        let icl = 0.155 * inputs.clo;
        let m = inputs.met * MET_TO_W_M2;
        let mw = m - self.external_work * MET_TO_W_M2;

        let f_cl = if icl <= 0.078 {
            1.0 + 1.29 * icl
        } else {
            1.05 + 0.645 * icl
        };

        let hcf = 12.1 * inputs.relative_velocity.sqrt();
        let taa = tdb + 273.0;
        let tra = tr + 273.0;
        let t_cla = taa + (35.5 - tdb) / (3.5 * icl + 0.1);

        let p1 = icl * f_cl;
        let p2 = p1 * 3.96;
        let p3 = p1 * 100.0;
        let p4 = p1 * taa;
        let p5 = (308.7 - 0.028 * mw) + p2 * (tra / 100.0).powi(4);

        // Clothing surface temperature, solved by successive halving
        let mut xn = t_cla / 100.0;
        let mut xf = t_cla / 50.0;
        let mut hc = hcf;
        let mut iterations = 0;
        while (xn - xf).abs() > CONVERGENCE_TOLERANCE {
            xf = (xf + xn) / 2.0;
            let hcn = 2.38 * (100.0 * xf - taa).abs().powf(0.25);
            hc = hcf.max(hcn);
            xn = (p5 + p4 * hc - p2 * xf.powi(4)) / (100.0 + p3 * hc);

            iterations += 1;
            if iterations > MAX_ITERATIONS {
                return Err(ComfortError::PmvComputation {
                    ac_temp: tdb,
                    air_velocity: inputs.relative_velocity,
                    reason: format!(
                        "clothing surface temperature did not converge in {} iterations",
                        MAX_ITERATIONS
                    ),
                });
            }
        }
        let tcl = 100.0 * xn - 273.0;

        // Heat loss components
        let hl1 = 3.05 * 0.001 * (5733.0 - 6.99 * mw - pa);
        let hl2 = if mw > MET_TO_W_M2 {
            0.42 * (mw - MET_TO_W_M2)
        } else {
            0.0
        };
        let hl3 = 1.7 * 0.00001 * m * (5867.0 - pa);
        let hl4 = 0.0014 * m * (34.0 - tdb);
        let hl5 = 3.96 * f_cl * (xn.powi(4) - (tra / 100.0).powi(4));
        let hl6 = f_cl * hc * (tcl - tdb);

        let ts = 0.303 * (-0.036 * m).exp() + 0.028;
        Ok(ts * (mw - hl1 - hl2 - hl3 - hl4 - hl5 - hl6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(temp: f64, velocity: f64, rh: f64, met: f64, clo: f64) -> PmvInputs {
        PmvInputs {
            air_temp: temp,
            mean_radiant_temp: temp,
            relative_velocity: velocity,
            relative_humidity: rh,
            met,
            clo,
        }
    }

    #[test]
    fn test_reference_values() {
        let model = Iso7730Pmv::default();
        let cases = [
            (inputs(25.0, 0.1, 50.0, 1.2, 0.5), 0.08),
            (inputs(22.0, 0.1, 60.0, 1.0, 1.0), -0.28),
            (inputs(30.0, 0.2, 40.0, 1.0, 0.5), 1.22),
        ];
        for (case, expected) in cases {
            let pmv = model.pmv(&case).unwrap();
            assert!(
                (pmv - expected).abs() < 0.01,
                "{:?}: got {}, expected {}",
                case,
                pmv,
                expected
            );
        }
    }

    #[test]
    fn test_more_air_movement_feels_cooler() {
        let model = Iso7730Pmv::default();
        let still = model.pmv(&inputs(28.0, 0.1, 60.0, 1.5, 0.5)).unwrap();
        let breezy = model.pmv(&inputs(28.0, 2.0, 60.0, 1.5, 0.5)).unwrap();
        assert!(breezy < still);
    }

    #[test]
    fn test_warmer_air_feels_warmer() {
        let model = Iso7730Pmv::default();
        let cool = model.pmv(&inputs(24.0, 0.5, 60.0, 1.5, 0.5)).unwrap();
        let warm = model.pmv(&inputs(28.0, 0.5, 60.0, 1.5, 0.5)).unwrap();
        assert!(warm > cool);
    }

    #[test]
    fn test_closure_model() {
        let constant = |_: &PmvInputs| 0.25;
        assert_eq!(constant.pmv(&inputs(25.0, 0.1, 50.0, 1.0, 0.5)).unwrap(), 0.25);
    }
}
