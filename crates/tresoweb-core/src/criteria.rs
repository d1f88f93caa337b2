//! Filter criteria value object

use serde::{Deserialize, Serialize};

use crate::types::{DateBucket, SignBucket, StatusBucket};

/// One immutable set of filter constraints.
///
/// The four dimensions are independent and conjunctive: a record passes
/// when it satisfies every constrained dimension. An unconstrained
/// dimension (empty text, `None` bucket) passes everything. Criteria are
/// rebuilt from the current control values on every filter pass; they
/// are never kept around and mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Substring to look for in the concatenated text fields,
    /// case-insensitive; empty means unconstrained
    #[serde(default)]
    pub search_text: String,
    /// Constraint on the amount's sign
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<SignBucket>,
    /// Constraint on the date's recency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateBucket>,
    /// Constraint on the active flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusBucket>,
}

impl Criteria {
    /// Creates an empty (match-everything) criteria set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text constraint.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Sets the sign constraint.
    #[must_use]
    pub fn with_sign(mut self, sign: SignBucket) -> Self {
        self.sign = Some(sign);
        self
    }

    /// Sets the date constraint.
    #[must_use]
    pub fn with_date(mut self, date: DateBucket) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the status constraint.
    #[must_use]
    pub fn with_status(mut self, status: StatusBucket) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if no dimension is constrained (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.sign.is_none()
            && self.date.is_none()
            && self.status.is_none()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        assert!(Criteria::new().is_empty());
        assert!(Criteria::default().is_empty());
    }

    #[test]
    fn test_builder_sets_dimensions() {
        let criteria = Criteria::new()
            .with_search("dupont")
            .with_sign(SignBucket::Debtor)
            .with_status(StatusBucket::Active);

        assert_eq!(criteria.search_text, "dupont");
        assert_eq!(criteria.sign, Some(SignBucket::Debtor));
        assert_eq!(criteria.date, None);
        assert_eq!(criteria.status, Some(StatusBucket::Active));
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_any_single_dimension_is_not_empty() {
        assert!(!Criteria::new().with_search("x").is_empty());
        assert!(!Criteria::new().with_sign(SignBucket::Balanced).is_empty());
        assert!(!Criteria::new().with_date(DateBucket::Recent).is_empty());
        assert!(!Criteria::new().with_status(StatusBucket::Inactive).is_empty());
    }
}
