//! Relative-date bucketing for record timestamps

use chrono::{DateTime, Datelike, Utc};

use crate::types::DateBucket;

/// Upper day boundary (inclusive) for the recent bucket
pub const RECENT_MAX_DAYS: i64 = 30;
/// Lower day boundary (exclusive) for the older bucket
pub const OLDER_MIN_DAYS: i64 = 90;

/// Whole calendar days elapsed from `ts` to `now`, floor division.
/// Negative when `ts` lies in the future.
pub fn days_between(now: DateTime<Utc>, ts: DateTime<Utc>) -> i64 {
    (now - ts).num_seconds().div_euclid(86_400)
}

impl DateBucket {
    /// Whether a record timestamp falls in this bucket relative to `now`.
    ///
    /// A missing timestamp counts as very old: it satisfies only
    /// `Older`. Recent and Older are not complements; a timestamp
    /// 31 to 90 days old falls in neither.
    pub fn matches_at(&self, ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let ts = match ts {
            Some(ts) => ts,
            None => return matches!(self, DateBucket::Older),
        };

        match self {
            DateBucket::Recent => days_between(now, ts) <= RECENT_MAX_DAYS,
            DateBucket::ThisMonth => ts.year() == now.year() && ts.month() == now.month(),
            DateBucket::ThisQuarter => {
                ts.year() == now.year() && ts.month0() / 3 == now.month0() / 3
            }
            DateBucket::Older => days_between(now, ts) > OLDER_MIN_DAYS,
        }
    }

    /// Same as [`matches_at`](Self::matches_at) against the current time.
    pub fn matches(&self, ts: Option<DateTime<Utc>>) -> bool {
        self.matches_at(ts, Utc::now())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_days_between_floor() {
        let now = fixed_now();
        assert_eq!(days_between(now, now), 0);
        assert_eq!(days_between(now, now - Duration::hours(36)), 1);
        assert_eq!(days_between(now, now - Duration::days(5)), 5);
        // Future timestamps floor downwards, not towards zero
        assert_eq!(days_between(now, now + Duration::hours(12)), -1);
    }

    #[test]
    fn test_recent_boundary() {
        let now = fixed_now();
        assert!(DateBucket::Recent.matches_at(Some(now - Duration::days(30)), now));
        assert!(!DateBucket::Recent.matches_at(Some(now - Duration::days(31)), now));
    }

    #[test]
    fn test_older_boundary() {
        let now = fixed_now();
        assert!(!DateBucket::Older.matches_at(Some(now - Duration::days(90)), now));
        assert!(DateBucket::Older.matches_at(Some(now - Duration::days(91)), now));
    }

    #[test]
    fn test_gap_between_recent_and_older() {
        let now = fixed_now();
        // 31-90 days old falls in neither bucket
        for days in [31, 60, 90] {
            let ts = Some(now - Duration::days(days));
            assert!(!DateBucket::Recent.matches_at(ts, now), "{} days", days);
            assert!(!DateBucket::Older.matches_at(ts, now), "{} days", days);
        }
    }

    #[test]
    fn test_this_month() {
        let now = fixed_now();
        assert!(DateBucket::ThisMonth.matches_at(
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            now
        ));
        assert!(!DateBucket::ThisMonth.matches_at(
            Some(Utc.with_ymd_and_hms(2024, 4, 30, 23, 59, 59).unwrap()),
            now
        ));
        // Same month of a different year does not match
        assert!(!DateBucket::ThisMonth.matches_at(
            Some(Utc.with_ymd_and_hms(2023, 5, 15, 0, 0, 0).unwrap()),
            now
        ));
    }

    #[test]
    fn test_this_quarter() {
        let now = fixed_now(); // May = Q2
        assert!(DateBucket::ThisQuarter.matches_at(
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
            now
        ));
        assert!(DateBucket::ThisQuarter.matches_at(
            Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()),
            now
        ));
        assert!(!DateBucket::ThisQuarter.matches_at(
            Some(Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()),
            now
        ));
        assert!(!DateBucket::ThisQuarter.matches_at(
            Some(Utc.with_ymd_and_hms(2023, 5, 15, 0, 0, 0).unwrap()),
            now
        ));
    }

    #[test]
    fn test_missing_timestamp_is_very_old() {
        let now = fixed_now();
        assert!(DateBucket::Older.matches_at(None, now));
        assert!(!DateBucket::Recent.matches_at(None, now));
        assert!(!DateBucket::ThisMonth.matches_at(None, now));
        assert!(!DateBucket::ThisQuarter.matches_at(None, now));
    }
}
