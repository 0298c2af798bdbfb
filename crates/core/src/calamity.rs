//! Calamity type catalog and validation (PRD-02).
//!
//! The fixed set of calamity types the intake form accepts. Values are
//! stored verbatim in `recipient_requests.type_of_calamity` and become the
//! grouping keys of every dashboard aggregation, so intake rejects anything
//! outside this list instead of trusting the client form.

use crate::error::CoreError;

/// All calamity types a recipient can report.
pub const CALAMITY_TYPES: &[&str] = &[
    "Flood",
    "Earthquake",
    "Tropical Disease",
    "Drought",
    "Dengue Fever",
    "Water Shortage",
    "Heatwave",
    "Tsunami",
    "Leptospirosis",
    "Volcanic Eruption",
    "Landslide",
    "Typhoon",
    "Fire",
];

/// Validate that a calamity type is one of the accepted catalog values.
pub fn validate_calamity_type(value: &str) -> Result<(), CoreError> {
    if CALAMITY_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid calamity type '{value}'. Must be one of: {}",
            CALAMITY_TYPES.join(", ")
        )))
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_catalog_values_accepted() {
        for calamity in CALAMITY_TYPES {
            assert!(validate_calamity_type(calamity).is_ok());
        }
    }

    #[test]
    fn test_unknown_calamity_rejected() {
        let result = validate_calamity_type("Meteor Strike");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid calamity type"));
    }

    #[test]
    fn test_empty_calamity_rejected() {
        assert!(validate_calamity_type("").is_err());
    }

    #[test]
    fn test_catalog_is_case_sensitive() {
        assert!(validate_calamity_type("flood").is_err());
        assert!(validate_calamity_type("FLOOD").is_err());
    }
}
