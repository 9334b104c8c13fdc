//! Parsing utilities for CLI arguments and interactive input.
//!
//! Raw text is turned into numbers here so that the calculator only ever
//! sees `f64` values.

use crate::config::CLOTHING_TABLE;
use crate::error::{ComfortError, Result};

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parse a numeric field entered by the user.
///
/// Surrounding whitespace is ignored. NaN and infinities are rejected just
/// like non-numeric text.
///
/// # Arguments
/// * `field` - Field name used in the error message
/// * `input` - Raw text
///
/// # Example
/// ```
/// use ac_fan_comfort::utils::parsing::parse_numeric_field;
///
/// assert_eq!(parse_numeric_field("heart rate", " 72 ").unwrap(), 72.0);
/// assert!(parse_numeric_field("heart rate", "fast").is_err());
/// ```
pub fn parse_numeric_field(field: &str, input: &str) -> Result<f64> {
    let invalid = || ComfortError::InvalidNumber {
        field: field.to_string(),
        input: input.to_string(),
    };

    let value: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

// =============================================================================
// Clothing Parsing
// =============================================================================

/// Resolve a clothing choice to a descriptor.
///
/// Accepts a 1-based index into the clothing table ("1" to "6") or any
/// free text. Free text is passed through unchanged so that unknown
/// descriptors still reach the lenient lookup.
///
/// # Example
/// ```
/// use ac_fan_comfort::utils::parsing::parse_clothing_choice;
///
/// assert_eq!(parse_clothing_choice("4"), "heavy blanket");
/// assert_eq!(parse_clothing_choice("Light Blanket"), "Light Blanket");
/// ```
pub fn parse_clothing_choice(input: &str) -> String {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        if let Some((name, _)) = index.checked_sub(1).and_then(|i| CLOTHING_TABLE.get(i)) {
            return name.to_string();
        }
    }
    trimmed.to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_field() {
        assert_eq!(parse_numeric_field("desired", "24").unwrap(), 24.0);
        assert_eq!(parse_numeric_field("desired", "-3.5").unwrap(), -3.5);
        assert_eq!(parse_numeric_field("desired", "\t26.5\n").unwrap(), 26.5);
    }

    #[test]
    fn test_parse_numeric_field_invalid() {
        for input in ["", "abc", "24C", "NaN", "inf"] {
            let err = parse_numeric_field("desired", input).unwrap_err();
            assert!(
                matches!(err, ComfortError::InvalidNumber { .. }),
                "{:?} accepted",
                input
            );
        }
    }

    #[test]
    fn test_parse_clothing_choice() {
        assert_eq!(parse_clothing_choice("1"), "summer clothing");
        assert_eq!(parse_clothing_choice(" 6 "), "sweater and trousers");
        assert_eq!(parse_clothing_choice("0"), "0");
        assert_eq!(parse_clothing_choice("7"), "7");
        assert_eq!(parse_clothing_choice("winter clothing"), "winter clothing");
    }
}
