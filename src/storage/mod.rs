//! Persistence module.
//!
//! Handles the JSON config file and CSV export of search lookup tables.

pub mod export;
pub mod settings;

// Re-export commonly used items
pub use export::{export_filename, export_lookup_table, write_lookup_table};
pub use settings::*;
