//! Donation lifecycle statuses and transition rules (PRD-03).
//!
//! A donation moves through a fixed linear sequence:
//!
//! ```text
//! PLEDGED -> COLLECTED -> PROCESSING -> IN_TRANSIT -> RECEIVED
//! ```
//!
//! Transitions never skip a stage and never move backwards; `RECEIVED` is
//! terminal. Validation lives here as pure checks; the repository layer is
//! responsible for applying a transition atomically (status column update
//! plus one appended status log row).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a donation, stored as text in `donations.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    /// Donor has committed items; nothing has moved yet.
    Pledged,
    /// Items are physically in hand at the collection point.
    Collected,
    /// Items are being sorted and packed.
    Processing,
    /// Items are on the way to the recipient's barangay.
    InTransit,
    /// Recipient confirmed receipt. Terminal.
    Received,
}

impl DonationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: &'static [DonationStatus] = &[
        DonationStatus::Pledged,
        DonationStatus::Collected,
        DonationStatus::Processing,
        DonationStatus::InTransit,
        DonationStatus::Received,
    ];

    /// The stored/wire form of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            DonationStatus::Pledged => "PLEDGED",
            DonationStatus::Collected => "COLLECTED",
            DonationStatus::Processing => "PROCESSING",
            DonationStatus::InTransit => "IN_TRANSIT",
            DonationStatus::Received => "RECEIVED",
        }
    }

    /// Parse a stored/wire status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "PLEDGED" => Ok(DonationStatus::Pledged),
            "COLLECTED" => Ok(DonationStatus::Collected),
            "PROCESSING" => Ok(DonationStatus::Processing),
            "IN_TRANSIT" => Ok(DonationStatus::InTransit),
            "RECEIVED" => Ok(DonationStatus::Received),
            other => Err(CoreError::Validation(format!(
                "Invalid donation status '{other}'. Must be one of: {}",
                DonationStatus::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Statuses this one may transition to. A singleton slice of the next
    /// stage, or empty for the terminal status.
    pub fn next_allowed(self) -> &'static [DonationStatus] {
        match self {
            DonationStatus::Pledged => &[DonationStatus::Collected],
            DonationStatus::Collected => &[DonationStatus::Processing],
            DonationStatus::Processing => &[DonationStatus::InTransit],
            DonationStatus::InTransit => &[DonationStatus::Received],
            DonationStatus::Received => &[],
        }
    }

    /// Whether no further transitions are allowed from this status.
    pub fn is_terminal(self) -> bool {
        self.next_allowed().is_empty()
    }

    /// Validate a proposed transition without applying it.
    pub fn validate_transition(self, target: DonationStatus) -> Result<(), CoreError> {
        if self.next_allowed().contains(&target) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
