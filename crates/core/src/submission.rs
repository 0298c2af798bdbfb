//! Aid request intake normalization (PRD-02).
//!
//! The public intake form arrives as multipart text fields, so every value
//! is an optional string until it passes through [`normalize`]. Required
//! fields reject absent *or* blank values; optional numeric fields coerce
//! blank values to zero; `number_of_children` is derived once here as the
//! sum of the four age-band counts and stored redundantly, never re-derived
//! downstream.

use crate::calamity::validate_calamity_type;
use crate::error::CoreError;
use crate::types::DbId;

/// Raw intake form fields, exactly as extracted from the multipart body.
#[derive(Debug, Default)]
pub struct RawSubmission {
    pub complete_name: Option<String>,
    pub age: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
    pub barangay_id: Option<String>,
    pub area: Option<String>,
    pub type_of_calamity: Option<String>,
    pub no_of_family_members: Option<String>,
    pub age_group_infant: Option<String>,
    pub age_group_early_child: Option<String>,
    pub age_group_middle_child: Option<String>,
    pub age_group_adolescent: Option<String>,
    pub in_kind_necessities: Option<String>,
    pub specifications: Option<String>,
    pub proof_photo: Option<Vec<u8>>,
}

/// A validated intake payload, ready for persistence.
///
/// `barangay_id` has passed format validation only; resolving it against the
/// barangay table is the caller's job (an unresolvable id is
/// [`CoreError::UnknownBarangay`] at that boundary).
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    pub complete_name: String,
    pub age: i32,
    pub contact_number: String,
    pub email_address: Option<String>,
    pub barangay_id: DbId,
    pub area: String,
    pub type_of_calamity: String,
    pub no_of_family_members: i32,
    pub number_of_children: i32,
    pub age_group_infant: i32,
    pub age_group_early_child: i32,
    pub age_group_middle_child: i32,
    pub age_group_adolescent: i32,
    pub in_kind_necessities: String,
    pub specifications: serde_json::Value,
    pub proof_photo: Option<Vec<u8>>,
}

/* --------------------------------------------------------------------------
Field helpers
-------------------------------------------------------------------------- */

/// A required text field: absent or blank fails with `MissingField`.
fn required_text(value: &Option<String>, field: &'static str) -> Result<String, CoreError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(CoreError::MissingField { field }),
    }
}

/// An optional text field: blank collapses to `None`.
fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// An optional numeric field: absent or blank coerces to 0, anything else
/// must parse as a non-negative integer.
fn numeric_or_zero(value: &Option<String>, field: &'static str) -> Result<i32, CoreError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(0),
        Some(text) => parse_count(text, field),
    }
}

/// A required numeric field: absent or blank fails with `MissingField`.
fn required_numeric(value: &Option<String>, field: &'static str) -> Result<i32, CoreError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Err(CoreError::MissingField { field }),
        Some(text) => parse_count(text, field),
    }
}

fn parse_count(text: &str, field: &'static str) -> Result<i32, CoreError> {
    let parsed: i32 = text.parse().map_err(|_| {
        CoreError::Validation(format!("Field '{field}' must be a number, got '{text}'"))
    })?;
    if parsed < 0 {
        return Err(CoreError::Validation(format!(
            "Field '{field}' must not be negative"
        )));
    }
    Ok(parsed)
}

/// The `specifications` field is a JSON object mapping item names to
/// free-text notes. Absent or blank becomes the empty object.
fn parse_specifications(value: &Option<String>) -> Result<serde_json::Value, CoreError> {
    let raw = match value.as_deref().map(str::trim) {
        None | Some("") => return Ok(serde_json::json!({})),
        Some(text) => text,
    };
    let parsed: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        CoreError::Validation(format!("Field 'specifications' is not valid JSON: {e}"))
    })?;
    if !parsed.is_object() {
        return Err(CoreError::Validation(
            "Field 'specifications' must be a JSON object".to_string(),
        ));
    }
    Ok(parsed)
}

/* --------------------------------------------------------------------------
Normalization
-------------------------------------------------------------------------- */

/// Normalize a raw intake submission into a persistable payload.
///
/// Validation order: required fields first, then field formats, so a form
/// with several problems reports the missing field before the malformed one.
pub fn normalize(raw: RawSubmission) -> Result<NormalizedRequest, CoreError> {
    let complete_name = required_text(&raw.complete_name, "complete_name")?;
    let contact_number = required_text(&raw.contact_number, "contact_number")?;
    let area = required_text(&raw.area, "area")?;
    let type_of_calamity = required_text(&raw.type_of_calamity, "type_of_calamity")?;
    let barangay_raw = required_text(&raw.barangay_id, "barangay_id")?;
    let no_of_family_members =
        required_numeric(&raw.no_of_family_members, "no_of_family_members")?;

    validate_calamity_type(&type_of_calamity)?;

    let barangay_id: DbId = barangay_raw.parse().map_err(|_| {
        CoreError::Validation(format!(
            "Field 'barangay_id' must be a numeric id, got '{barangay_raw}'"
        ))
    })?;

    let age = numeric_or_zero(&raw.age, "age")?;
    let age_group_infant = numeric_or_zero(&raw.age_group_infant, "age_group_infant")?;
    let age_group_early_child =
        numeric_or_zero(&raw.age_group_early_child, "age_group_early_child")?;
    let age_group_middle_child =
        numeric_or_zero(&raw.age_group_middle_child, "age_group_middle_child")?;
    let age_group_adolescent =
        numeric_or_zero(&raw.age_group_adolescent, "age_group_adolescent")?;

    let number_of_children = age_group_infant
        + age_group_early_child
        + age_group_middle_child
        + age_group_adolescent;

    let specifications = parse_specifications(&raw.specifications)?;

    Ok(NormalizedRequest {
        complete_name,
        age,
        contact_number,
        email_address: optional_text(&raw.email_address),
        barangay_id,
        area,
        type_of_calamity,
        no_of_family_members,
        number_of_children,
        age_group_infant,
        age_group_early_child,
        age_group_middle_child,
        age_group_adolescent,
        in_kind_necessities: optional_text(&raw.in_kind_necessities).unwrap_or_default(),
        specifications,
        proof_photo: raw.proof_photo,
    })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
