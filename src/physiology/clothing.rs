//! Clothing descriptor to insulation.

use crate::config::{CLOTHING_TABLE, DEFAULT_CLO};

/// Map a clothing descriptor (e.g. "light blanket") to its clo value.
///
/// Matching ignores case and surrounding whitespace. Unknown descriptors
/// fall back to summer clothing ([`DEFAULT_CLO`]); this lenient default
/// is policy, so the caller never gets an error here.
pub fn clothing_to_clo(descriptor: &str) -> f64 {
    match lookup_clothing(descriptor) {
        Some(clo) => clo,
        None => {
            log::warn!(
                "Unknown clothing '{}', defaulting to summer clothing ({} clo)",
                descriptor,
                DEFAULT_CLO
            );
            DEFAULT_CLO
        }
    }
}

/// Strict lookup; `None` when the descriptor is not in the table.
pub fn lookup_clothing(descriptor: &str) -> Option<f64> {
    let search = descriptor.trim().to_lowercase();
    CLOTHING_TABLE
        .iter()
        .find(|(name, _)| *name == search)
        .map(|&(_, clo)| clo)
}

/// Known clothing descriptors in table order.
pub fn clothing_descriptors() -> impl Iterator<Item = &'static str> {
    CLOTHING_TABLE.iter().map(|&(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_descriptors() {
        assert_eq!(clothing_to_clo("summer clothing"), 0.5);
        assert_eq!(clothing_to_clo("winter clothing"), 1.0);
        assert_eq!(clothing_to_clo("light blanket"), 0.7);
        assert_eq!(clothing_to_clo("heavy blanket"), 1.5);
        assert_eq!(clothing_to_clo("shirt and trousers"), 0.6);
        assert_eq!(clothing_to_clo("sweater and trousers"), 1.2);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(clothing_to_clo("Heavy Blanket"), 1.5);
        assert_eq!(clothing_to_clo("  WINTER CLOTHING "), 1.0);
    }

    #[test]
    fn test_unknown_defaults_to_summer() {
        assert_eq!(clothing_to_clo("space suit"), 0.5);
        assert_eq!(clothing_to_clo(""), 0.5);
        assert!(lookup_clothing("space suit").is_none());
    }

    #[test]
    fn test_descriptor_listing() {
        let names: Vec<_> = clothing_descriptors().collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "summer clothing");
    }
}
