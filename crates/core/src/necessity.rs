//! In-kind necessity catalog and item list parsing (PRD-02).
//!
//! Necessities are stored on a request as one comma-joined string, exactly
//! as submitted. [`split_items`] is the single parsing rule shared by the
//! aggregation engine and anything else that needs individual item names.

/// All in-kind necessity categories offered on the intake form.
pub const NECESSITY_CATALOG: &[&str] = &[
    "Child and Infant Care Items",
    "Clothing and Footwear",
    "Cleaning and Sanitary Supplies",
    "Education",
    "Electronic Devices",
    "Construction Materials",
    "Emergency Communications and Connectivity",
    "First Aid Kit Essentials",
    "Fire Prevention and Safety Products",
    "Health",
    "Hygiene Supplies",
    "Livelihood Support",
    "Livestock and Animal care",
    "Planting materials",
    "Food",
    "Shelter Materials",
    "Solar Energy Solutions",
    "Water Filtration and Purification Systems",
];

/// Split a stored necessity list (`"Food, Shelter Materials"`) into trimmed,
/// non-empty item names. A blank or comma-only input yields an empty vec.
pub fn split_items(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
