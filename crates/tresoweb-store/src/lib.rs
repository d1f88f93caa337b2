//! Snapshot loading for tresoweb
//!
//! Reads the JSON exports the back office produces per entity list into
//! in-memory records. Loading happens once per view activation; the
//! filter engine only ever sees the result, never the source.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use tresoweb_core::{EntityKind, Record};

pub mod error;

pub use error::StoreError;

/// Store reference type
pub type StoreRef = Arc<dyn RecordStore>;

// ==================== Store Trait ====================

/// Trait for record snapshot sources
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the full snapshot for one entity kind
    async fn load_records(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError>;
}

/// Parse a snapshot export: a JSON array of flat objects.
///
/// The array itself must be well-formed; field-level oddities inside a
/// record are the engine's problem and are accepted as-is.
pub fn parse_records(content: &str, origin: &str) -> Result<Vec<Record>, StoreError> {
    serde_json::from_str(content).map_err(|e| StoreError::InvalidSnapshot {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

// ==================== JSON File Store ====================

/// Store backed by one JSON export file per entity kind
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    base_dir: PathBuf,
    tiers_file: String,
    transactions_file: String,
    purchases_file: String,
}

impl JsonRecordStore {
    /// Create a store over a directory with the conventional file names
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            tiers_file: "tiers.json".to_string(),
            transactions_file: "transactions.json".to_string(),
            purchases_file: "purchases.json".to_string(),
        }
    }

    /// Override the per-entity file names
    #[must_use]
    pub fn with_files(
        mut self,
        tiers_file: impl Into<String>,
        transactions_file: impl Into<String>,
        purchases_file: impl Into<String>,
    ) -> Self {
        self.tiers_file = tiers_file.into();
        self.transactions_file = transactions_file.into();
        self.purchases_file = purchases_file.into();
        self
    }

    /// Full path of the export file for one entity kind
    pub fn file_for(&self, kind: EntityKind) -> PathBuf {
        let name = match kind {
            EntityKind::Tiers => &self.tiers_file,
            EntityKind::Transactions => &self.transactions_file,
            EntityKind::Purchases => &self.purchases_file,
        };
        self.base_dir.join(name)
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn load_records(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let path = self.file_for(kind);
        let content = tokio::fs::read_to_string(&path).await?;
        let records = parse_records(&content, &path.to_string_lossy())?;
        log::debug!("loaded {} {} records from {}", records.len(), kind, path.display());
        Ok(records)
    }
}

// ==================== Tests ====================
