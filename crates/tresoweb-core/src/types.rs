//! Basic types for the filter engine

use serde::{Deserialize, Serialize};

/// Entity kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Business parties (clients and suppliers)
    Tiers,
    /// Treasury transactions
    Transactions,
    /// Purchase records
    Purchases,
}

impl std::str::FromStr for EntityKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiers" => Ok(EntityKind::Tiers),
            "transactions" | "transaction" => Ok(EntityKind::Transactions),
            "purchases" | "purchase" | "achats" => Ok(EntityKind::Purchases),
            _ => Err(format!("Invalid entity kind: {}", s)),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Tiers => write!(f, "tiers"),
            EntityKind::Transactions => write!(f, "transactions"),
            EntityKind::Purchases => write!(f, "purchases"),
        }
    }
}

/// Sign classification of the record's amount field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignBucket {
    /// Amount strictly positive (the party owes us)
    Debtor,
    /// Amount strictly negative (we owe the party)
    Creditor,
    /// Amount exactly zero
    Balanced,
}

impl std::str::FromStr for SignBucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debtor" | "debiteur" => Ok(SignBucket::Debtor),
            "creditor" | "crediteur" => Ok(SignBucket::Creditor),
            "balanced" | "equilibre" => Ok(SignBucket::Balanced),
            _ => Err(format!("Invalid sign bucket: {}", s)),
        }
    }
}

impl std::fmt::Display for SignBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignBucket::Debtor => write!(f, "debtor"),
            SignBucket::Creditor => write!(f, "creditor"),
            SignBucket::Balanced => write!(f, "balanced"),
        }
    }
}

/// Relative-recency classification of the record's date field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBucket {
    /// At most 30 days old
    Recent,
    /// Same calendar month and year as now
    ThisMonth,
    /// Same calendar quarter and year as now
    ThisQuarter,
    /// More than 90 days old
    Older,
}

impl std::str::FromStr for DateBucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(DateBucket::Recent),
            "this_month" | "month" => Ok(DateBucket::ThisMonth),
            "this_quarter" | "quarter" => Ok(DateBucket::ThisQuarter),
            "older" => Ok(DateBucket::Older),
            _ => Err(format!("Invalid date bucket: {}", s)),
        }
    }
}

impl std::fmt::Display for DateBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateBucket::Recent => write!(f, "recent"),
            DateBucket::ThisMonth => write!(f, "this_month"),
            DateBucket::ThisQuarter => write!(f, "this_quarter"),
            DateBucket::Older => write!(f, "older"),
        }
    }
}

/// Activity classification of the record's active flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBucket {
    /// The record is in use
    Active,
    /// The record was deactivated
    Inactive,
}

impl std::str::FromStr for StatusBucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "actif" => Ok(StatusBucket::Active),
            "inactive" | "inactif" => Ok(StatusBucket::Inactive),
            _ => Err(format!("Invalid status bucket: {}", s)),
        }
    }
}

impl std::fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusBucket::Active => write!(f, "active"),
            StatusBucket::Inactive => write!(f, "inactive"),
        }
    }
}

/// Party role for tiers records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// A customer of the company
    Client,
    /// A vendor of the company
    Supplier,
}

impl std::str::FromStr for PartyKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(PartyKind::Client),
            "supplier" | "fournisseur" => Ok(PartyKind::Supplier),
            _ => Err(format!("Invalid party kind: {}", s)),
        }
    }
}

impl std::fmt::Display for PartyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartyKind::Client => write!(f, "client"),
            PartyKind::Supplier => write!(f, "supplier"),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("tiers".parse::<EntityKind>().unwrap(), EntityKind::Tiers);
        assert_eq!("transaction".parse::<EntityKind>().unwrap(), EntityKind::Transactions);
        assert_eq!("achats".parse::<EntityKind>().unwrap(), EntityKind::Purchases);
        assert!("invoices".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_sign_bucket_from_str() {
        assert_eq!("debtor".parse::<SignBucket>().unwrap(), SignBucket::Debtor);
        assert_eq!("crediteur".parse::<SignBucket>().unwrap(), SignBucket::Creditor);
        assert_eq!("balanced".parse::<SignBucket>().unwrap(), SignBucket::Balanced);
    }

    #[test]
    fn test_date_bucket_from_str() {
        assert_eq!("recent".parse::<DateBucket>().unwrap(), DateBucket::Recent);
        assert_eq!("month".parse::<DateBucket>().unwrap(), DateBucket::ThisMonth);
        assert_eq!("this_quarter".parse::<DateBucket>().unwrap(), DateBucket::ThisQuarter);
        assert_eq!("older".parse::<DateBucket>().unwrap(), DateBucket::Older);
    }

    #[test]
    fn test_status_bucket_from_str() {
        assert_eq!("actif".parse::<StatusBucket>().unwrap(), StatusBucket::Active);
        assert_eq!("inactive".parse::<StatusBucket>().unwrap(), StatusBucket::Inactive);
    }

    #[test]
    fn test_display_round_trip() {
        for kind in [EntityKind::Tiers, EntityKind::Transactions, EntityKind::Purchases] {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
        for bucket in [DateBucket::Recent, DateBucket::ThisMonth, DateBucket::ThisQuarter, DateBucket::Older] {
            assert_eq!(bucket.to_string().parse::<DateBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn test_party_kind_from_str() {
        assert_eq!("client".parse::<PartyKind>().unwrap(), PartyKind::Client);
        assert_eq!("fournisseur".parse::<PartyKind>().unwrap(), PartyKind::Supplier);
    }
}
