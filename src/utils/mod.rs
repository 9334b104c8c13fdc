pub mod parsing;

// Re-export commonly used items
pub use parsing::{parse_clothing_choice, parse_numeric_field};
