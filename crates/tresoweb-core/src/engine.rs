//! Predicate evaluation and snapshot filtering
//!
//! The functions here are pure and total: they never mutate the
//! snapshot, never reorder it, and never fail on malformed records.
//! The three entity listings share this one engine; a [`FieldProfile`]
//! tells it where each dimension lives on the record.

use chrono::{DateTime, Utc};

use crate::criteria::Criteria;
use crate::record::{FieldProfile, Record};
use crate::stats::{FilterResult, FilterStats};
use crate::types::{SignBucket, StatusBucket};

/// Build the lowercase free-text haystack for one record: the profile's
/// text fields, space-joined.
pub fn search_haystack(record: &Record, profile: &FieldProfile) -> String {
    profile
        .text_fields
        .iter()
        .map(|field| record.text(field).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether one record satisfies every constrained dimension, evaluated
/// against an explicit `now`. Checks run cheapest first and
/// short-circuit on the first failure.
pub fn matches_at(
    record: &Record,
    profile: &FieldProfile,
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> bool {
    if let Some(status) = criteria.status {
        let active = record.is_active(&profile.active_field);
        let wanted = status == StatusBucket::Active;
        if active != wanted {
            return false;
        }
    }

    if let Some(sign) = criteria.sign {
        let amount = record.amount(&profile.amount_field);
        let passes = match sign {
            SignBucket::Debtor => amount > 0.0,
            SignBucket::Creditor => amount < 0.0,
            // Exact zero only; an amount carrying rounding residue
            // stays debtor or creditor.
            SignBucket::Balanced => amount == 0.0,
        };
        if !passes {
            return false;
        }
    }

    if let Some(date) = criteria.date {
        if !date.matches_at(record.timestamp(&profile.date_field), now) {
            return false;
        }
    }

    if !criteria.search_text.is_empty() {
        let needle = criteria.search_text.to_lowercase();
        if !search_haystack(record, profile).contains(&needle) {
            return false;
        }
    }

    true
}

/// Same as [`matches_at`] against the current time.
pub fn matches(record: &Record, profile: &FieldProfile, criteria: &Criteria) -> bool {
    matches_at(record, profile, criteria, Utc::now())
}

/// Filter a snapshot against one criteria set, evaluated against an
/// explicit `now` so a single pass is internally consistent.
///
/// Returns the surviving records in snapshot order together with the
/// counts and the left-to-right sum of the amount field. The snapshot
/// itself is left untouched.
pub fn filter_records_at(
    records: &[Record],
    profile: &FieldProfile,
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> FilterResult {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| matches_at(record, profile, criteria, now))
        .cloned()
        .collect();

    let amount_sum = filtered
        .iter()
        .fold(0.0, |acc, record| acc + record.amount(&profile.amount_field));

    FilterResult {
        stats: FilterStats {
            total_count: records.len(),
            filtered_count: filtered.len(),
            amount_sum,
        },
        records: filtered,
    }
}

/// Same as [`filter_records_at`] against the current time.
pub fn filter_records(
    records: &[Record],
    profile: &FieldProfile,
    criteria: &Criteria,
) -> FilterResult {
    filter_records_at(records, profile, criteria, Utc::now())
}

// ==================== Tests ====================
