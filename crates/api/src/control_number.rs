//! Donation control number generation (PRD-03).
//!
//! Control numbers are the human-facing tracking reference printed on
//! receipts and quoted over the phone, shaped `DN-YYYYMMDD-XXXXXX`: the
//! pledge date plus six uppercase hex characters from a fresh UUID. The
//! database enforces uniqueness (`uq_donations_control_number`); callers
//! surface a duplicate as a conflict rather than retrying here.

use chrono::Utc;
use uuid::Uuid;

/// Prefix shared by every donation control number.
const CONTROL_NUMBER_PREFIX: &str = "DN";

/// Generate a control number for a donation pledged now.
pub fn generate_control_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase();
    format!("{CONTROL_NUMBER_PREFIX}-{date}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_number_has_expected_shape() {
        let number = generate_control_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3, "expected DN-date-suffix, got {number}");
        assert_eq!(parts[0], "DN");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn control_numbers_are_distinct() {
        let a = generate_control_number();
        let b = generate_control_number();
        assert_ne!(a, b);
    }
}
