//! Thermal comfort module.
//!
//! Provides the PMV model and the grid search that pairs an AC setpoint
//! with an air velocity.

mod grid_search;
pub mod pmv;

pub use grid_search::{
    ComfortConditions, ComfortGridSearch, LookupTable, MAX_GRID_CELLS, OptimalSetting, PmvSample,
    SearchGrid, SearchOutcome, axis_len,
};
pub use pmv::{Iso7730Pmv, PmvInputs, PmvModel};
