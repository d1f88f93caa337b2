//! Filter output and aggregate statistics

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Aggregate statistics for one filtered listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Size of the unfiltered snapshot
    pub total_count: usize,
    /// Number of records that passed the criteria
    pub filtered_count: usize,
    /// Sum of the amount field over the filtered records
    pub amount_sum: f64,
}

impl FilterStats {
    /// Combine per-group statistics into one display figure, e.g. the
    /// clients and suppliers listings filtered with the same criteria.
    pub fn combine<'a, I>(stats: I) -> Self
    where
        I: IntoIterator<Item = &'a FilterStats>,
    {
        let mut combined = FilterStats::default();
        for s in stats {
            combined.total_count += s.total_count;
            combined.filtered_count += s.filtered_count;
            combined.amount_sum += s.amount_sum;
        }
        combined
    }
}

/// Result of one filter pass: the surviving records, in input order,
/// plus the statistics the summary widgets display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterResult {
    /// Records that passed, preserving snapshot order
    pub records: Vec<Record>,
    /// Counts and sum for the summary line
    pub stats: FilterStats,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_sums_fields() {
        let clients = FilterStats { total_count: 10, filtered_count: 4, amount_sum: 150.0 };
        let suppliers = FilterStats { total_count: 6, filtered_count: 2, amount_sum: -40.0 };

        let combined = FilterStats::combine([&clients, &suppliers]);
        assert_eq!(combined.total_count, 16);
        assert_eq!(combined.filtered_count, 6);
        assert_eq!(combined.amount_sum, 110.0);
    }

    #[test]
    fn test_combine_empty_is_default() {
        let combined = FilterStats::combine([]);
        assert_eq!(combined, FilterStats::default());
    }
}
