//! Dashboard aggregations over recipient requests (PRD-05).
//!
//! Five pure aggregations feed the admin analytics dashboard. All grouping
//! uses `IndexMap`, so group keys keep first-encountered input order and the
//! output is deterministic for a given record sequence. When counts tie, the
//! earlier-encountered key wins: winners are chosen with a strict
//! greater-than comparison and the descending sorts are stable.
//!
//! Records with no barangay group under the [`UNKNOWN_BARANGAY`] sentinel
//! instead of being dropped. A record whose necessity list cannot be parsed
//! is skipped with a warning; it never fails the whole batch.

use indexmap::IndexMap;
use serde::Serialize;

use crate::necessity::split_items;

/// Group label for records whose barangay is absent.
pub const UNKNOWN_BARANGAY: &str = "Unknown";

/// Flat request row consumed by the aggregations. The db layer produces
/// these by joining the barangay name onto each request.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub type_of_calamity: String,
    pub barangay_name: Option<String>,
    pub in_kind_necessities: String,
    pub no_of_family_members: i32,
    pub age_group_infant: i32,
    pub age_group_early_child: i32,
    pub age_group_middle_child: i32,
    pub age_group_adolescent: i32,
}

impl RequestRecord {
    fn barangay_label(&self) -> &str {
        self.barangay_name.as_deref().unwrap_or(UNKNOWN_BARANGAY)
    }
}

/* --------------------------------------------------------------------------
Output types
-------------------------------------------------------------------------- */

/// Requests per calamity type, sorted most-frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalamityCount {
    pub calamity_type: String,
    pub count: u32,
}

/// The hardest-hit barangay for one calamity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalamityImpact {
    pub calamity_type: String,
    pub barangay: String,
    pub count: u32,
}

/// The most-reported calamity type for one barangay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarangayCalamity {
    pub barangay: String,
    pub calamity_type: String,
    pub count: u32,
}

/// The most-requested in-kind item for one calamity type.
///
/// `most_requested_item` is `None` (with a zero count) when every record for
/// the calamity had an unparseable necessity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InKindByCalamity {
    pub calamity_type: String,
    pub most_requested_item: Option<String>,
    pub count: u32,
}

/// Affected-population age bands for one calamity type.
///
/// `adults` is derived per record as `no_of_family_members` minus the four
/// child bands, before summing across records. The difference is not
/// clamped, so a record reporting more children than family members
/// contributes a negative adult count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupDistribution {
    pub calamity_type: String,
    pub infants: i32,
    pub early_childhood: i32,
    pub middle_childhood: i32,
    pub adolescents: i32,
    pub adults: i32,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Pick the entry with the highest count. Strict greater-than means the
/// first key to reach the maximum wins ties.
fn max_entry(counts: IndexMap<&str, u32>) -> Option<(String, u32)> {
    let mut best: Option<(&str, u32)> = None;
    for (key, count) in counts {
        let replace = match best {
            Some((_, best_count)) => count > best_count,
            None => true,
        };
        if replace {
            best = Some((key, count));
        }
    }
    best.map(|(key, count)| (key.to_string(), count))
}

/* --------------------------------------------------------------------------
Aggregations
-------------------------------------------------------------------------- */

/// Count requests per calamity type, most frequent first.
///
/// The sort is stable, so calamities with equal counts keep their
/// first-encountered order. The counts always sum to `records.len()`.
pub fn count_by_calamity_type(records: &[RequestRecord]) -> Vec<CalamityCount> {
    let mut counts: IndexMap<&str, u32> = IndexMap::new();
    for record in records {
        *counts.entry(record.type_of_calamity.as_str()).or_insert(0) += 1;
    }

    let mut out: Vec<CalamityCount> = counts
        .into_iter()
        .map(|(calamity_type, count)| CalamityCount {
            calamity_type: calamity_type.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// For each calamity type, the barangay with the most requests.
pub fn most_impacted_barangay_per_calamity(records: &[RequestRecord]) -> Vec<CalamityImpact> {
    let mut groups: IndexMap<&str, IndexMap<&str, u32>> = IndexMap::new();
    for record in records {
        *groups
            .entry(record.type_of_calamity.as_str())
            .or_default()
            .entry(record.barangay_label())
            .or_insert(0) += 1;
    }

    groups
        .into_iter()
        .filter_map(|(calamity_type, per_barangay)| {
            max_entry(per_barangay).map(|(barangay, count)| CalamityImpact {
                calamity_type: calamity_type.to_string(),
                barangay,
                count,
            })
        })
        .collect()
}

/// For each barangay, the calamity type it reports most.
pub fn most_requested_calamity_per_barangay(records: &[RequestRecord]) -> Vec<BarangayCalamity> {
    let mut groups: IndexMap<&str, IndexMap<&str, u32>> = IndexMap::new();
    for record in records {
        *groups
            .entry(record.barangay_label())
            .or_default()
            .entry(record.type_of_calamity.as_str())
            .or_insert(0) += 1;
    }

    groups
        .into_iter()
        .filter_map(|(barangay, per_calamity)| {
            max_entry(per_calamity).map(|(calamity_type, count)| BarangayCalamity {
                barangay: barangay.to_string(),
                calamity_type,
                count,
            })
        })
        .collect()
}

/// For each calamity type, the most-requested in-kind item.
///
/// Item mentions are parsed with [`split_items`]; one record can mention
/// several items and contributes one count to each. A record with a blank
/// necessity list is skipped with a warning, but its calamity type still
/// appears in the output (as a `None` item) so the dashboard shows the
/// calamity rather than losing it.
pub fn most_requested_item_per_calamity(records: &[RequestRecord]) -> Vec<InKindByCalamity> {
    let mut groups: IndexMap<&str, IndexMap<&str, u32>> = IndexMap::new();
    for record in records {
        let items = split_items(&record.in_kind_necessities);
        let per_item = groups
            .entry(record.type_of_calamity.as_str())
            .or_default();
        if items.is_empty() {
            tracing::warn!(
                calamity_type = %record.type_of_calamity,
                "skipping request with no parseable in-kind items"
            );
            continue;
        }
        for item in items {
            *per_item.entry(item).or_insert(0) += 1;
        }
    }

    groups
        .into_iter()
        .map(|(calamity_type, per_item)| match max_entry(per_item) {
            Some((item, count)) => InKindByCalamity {
                calamity_type: calamity_type.to_string(),
                most_requested_item: Some(item),
                count,
            },
            None => InKindByCalamity {
                calamity_type: calamity_type.to_string(),
                most_requested_item: None,
                count: 0,
            },
        })
        .collect()
}

/// Sum the age bands per calamity type, deriving adults per record.
pub fn age_group_distribution_per_calamity(
    records: &[RequestRecord],
) -> Vec<AgeGroupDistribution> {
    let mut groups: IndexMap<&str, AgeGroupDistribution> = IndexMap::new();
    for record in records {
        let children = record.age_group_infant
            + record.age_group_early_child
            + record.age_group_middle_child
            + record.age_group_adolescent;
        let adults = record.no_of_family_members - children;

        let entry = groups
            .entry(record.type_of_calamity.as_str())
            .or_insert_with(|| AgeGroupDistribution {
                calamity_type: record.type_of_calamity.clone(),
                infants: 0,
                early_childhood: 0,
                middle_childhood: 0,
                adolescents: 0,
                adults: 0,
            });
        entry.infants += record.age_group_infant;
        entry.early_childhood += record.age_group_early_child;
        entry.middle_childhood += record.age_group_middle_child;
        entry.adolescents += record.age_group_adolescent;
        entry.adults += adults;
    }

    groups.into_values().collect()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
