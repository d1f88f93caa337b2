//! Flat entity records and per-entity field profiles

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{EntityKind, PartyKind};

/// A flat entity record as exported by the back office.
///
/// Field access is total: an absent or mistyped field degrades to the
/// neutral value for its class (empty text, zero amount, active flag,
/// very old timestamp) instead of failing. Bad rows must never block a
/// listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from any JSON value; non-objects yield an empty record
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Raw field access
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field, replacing any existing value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Number of fields on the record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a field as display text. Absent or non-textual fields read
    /// as the empty string; numeric codes are rendered as digits.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Read a field as a signed amount. Absent or unparseable fields
    /// read as 0.0. String values are parsed by leading numeric prefix,
    /// so "150.00 EUR" reads as 150.0.
    pub fn amount(&self, field: &str) -> f64 {
        match self.0.get(field) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => parse_amount_prefix(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Read a field as a timestamp. Accepts "YYYY-MM-DD HH:MM:SS",
    /// "YYYY-MM-DDTHH:MM:SS" and bare "YYYY-MM-DD"; anything else is
    /// `None`, which the date buckets treat as very old.
    pub fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        let raw = match self.0.get(field) {
            Some(Value::String(s)) => s.trim(),
            _ => return None,
        };

        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })?;

        Some(Utc.from_utc_datetime(&naive))
    }

    /// Resolve the active flag. The flag is true unless the field holds
    /// an explicit false: JSON `false`, a zero number, or the strings
    /// "0"/"false" (the back office persists the flag as a tinyint).
    pub fn is_active(&self, field: &str) -> bool {
        match self.0.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
            Some(Value::String(s)) => !matches!(s.trim().to_lowercase().as_str(), "0" | "false"),
            _ => true,
        }
    }

    /// Party role of a tiers record, read from its "type" field
    pub fn party_kind(&self) -> Option<PartyKind> {
        self.text("type").parse().ok()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parse the leading numeric prefix of a string: optional sign, digits,
/// at most one decimal point. Trailing text (currency codes, units) is
/// ignored, matching how the back office's exports mix the two.
fn parse_amount_prefix(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let mut chars = raw.chars().peekable();
    let mut num = String::new();
    let mut has_decimal = false;

    if let Some('-') = chars.peek() {
        num.push('-');
        chars.next();
    }

    for c in chars {
        if c.is_ascii_digit() {
            num.push(c);
        } else if c == '.' && !has_decimal {
            num.push(c);
            has_decimal = true;
        } else {
            break;
        }
    }

    if num.is_empty() || num == "-" {
        return None;
    }

    num.parse().ok()
}

// ==================== Field Profiles ====================

/// Per-entity mapping from filter dimensions to record fields.
///
/// One profile per entity kind replaces the back office's three
/// near-identical filter routines: the engine stays generic and the
/// profile says where to look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProfile {
    /// Fields concatenated into the free-text search haystack
    pub text_fields: Vec<String>,
    /// Signed amount field for the sign buckets and the sum statistic
    pub amount_field: String,
    /// Timestamp field for the date buckets
    pub date_field: String,
    /// Active flag field for the status buckets
    pub active_field: String,
}

impl FieldProfile {
    /// Profile for tiers (party) records
    pub fn tiers() -> Self {
        Self {
            text_fields: vec![
                "name".to_string(),
                "code".to_string(),
                "contact".to_string(),
                "email".to_string(),
                "phone".to_string(),
                "tax_id".to_string(),
                "address".to_string(),
            ],
            amount_field: "balance".to_string(),
            date_field: "created_at".to_string(),
            active_field: "active".to_string(),
        }
    }

    /// Profile for treasury transaction records
    pub fn transactions() -> Self {
        Self {
            text_fields: vec![
                "label".to_string(),
                "reference".to_string(),
                "account".to_string(),
                "category".to_string(),
            ],
            amount_field: "amount".to_string(),
            date_field: "date".to_string(),
            active_field: "active".to_string(),
        }
    }

    /// Profile for purchase records
    pub fn purchases() -> Self {
        Self {
            text_fields: vec![
                "supplier".to_string(),
                "reference".to_string(),
                "description".to_string(),
            ],
            amount_field: "amount".to_string(),
            date_field: "date".to_string(),
            active_field: "active".to_string(),
        }
    }
}

impl EntityKind {
    /// Built-in field profile for this entity kind
    pub fn profile(&self) -> FieldProfile {
        match self {
            EntityKind::Tiers => FieldProfile::tiers(),
            EntityKind::Transactions => FieldProfile::transactions(),
            EntityKind::Purchases => FieldProfile::purchases(),
        }
    }
}

// ==================== Tests ====================
