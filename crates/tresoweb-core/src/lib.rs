//! Core filtering engine and view sessions
//!
//! A listing page holds an immutable snapshot of backend records and a
//! set of filter controls. This crate owns everything between the two:
//! criteria built from the controls, the predicate/aggregation engine,
//! and the per-view session that debounces free-text input and pushes
//! results to the render layer. It knows nothing about how records are
//! fetched or how rows are drawn.

pub mod criteria;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod record;
pub mod stats;
pub mod time;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use tresoweb_config::Config;

pub use criteria::Criteria;
pub use debounce::Debouncer;
pub use engine::{filter_records, filter_records_at, matches, matches_at, search_haystack};
pub use error::{CoreError, ErrorCode, ErrorSeverity};
pub use record::{FieldProfile, Record};
pub use stats::{FilterResult, FilterStats};
pub use types::{DateBucket, EntityKind, PartyKind, SignBucket, StatusBucket};

/// Provider reference type
pub type ProviderRef = Arc<dyn CriteriaProvider>;

/// Sink reference type
pub type SinkRef = Arc<dyn RenderSink>;

// ==================== View Collaborators ====================

/// Reads the current filter control values.
///
/// The caller owns the controls; the engine only ever sees the criteria
/// snapshot taken at invocation time. With a debounced refresh this is
/// read when the timer fires, so a burst of keystrokes filters once,
/// with the final text.
pub trait CriteriaProvider: Send + Sync {
    /// Current control values as one criteria set
    fn current(&self) -> Criteria;
}

/// Receives filter output for display.
pub trait RenderSink: Send + Sync {
    /// Redraw the listing rows
    fn render_rows(&self, records: &[Record]);
    /// Redraw the summary widgets
    fn render_stats(&self, stats: &FilterStats);
}

// ==================== Snapshot Registry ====================

/// Per-session registry of loaded snapshots, one per entity kind.
///
/// Snapshots are written once after a backend load and only read from
/// then on; views hold cheap `Arc` handles to them.
#[derive(Debug, Default)]
pub struct SnapshotSet {
    snapshots: HashMap<EntityKind, Arc<Vec<Record>>>,
}

impl SnapshotSet {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the snapshot for one entity kind, replacing any previous one
    pub fn insert(&mut self, kind: EntityKind, records: Vec<Record>) {
        log::info!("snapshot installed: {} {} records", records.len(), kind);
        self.snapshots.insert(kind, Arc::new(records));
    }

    /// Whether a snapshot is loaded for the kind
    pub fn contains(&self, kind: EntityKind) -> bool {
        self.snapshots.contains_key(&kind)
    }

    /// Handle to the snapshot for one entity kind
    pub fn get(&self, kind: EntityKind) -> Result<Arc<Vec<Record>>, CoreError> {
        self.snapshots
            .get(&kind)
            .cloned()
            .ok_or(CoreError::NotLoaded { kind })
    }

    /// Open a filterable view over one entity kind's snapshot
    pub fn view(
        &self,
        kind: EntityKind,
        provider: ProviderRef,
        sink: SinkRef,
        config: &Config,
    ) -> Result<FilterView, CoreError> {
        let snapshot = self.get(kind)?;
        Ok(FilterView::new(kind, snapshot, provider, sink, config))
    }
}

// ==================== Filter View ====================

/// One filterable listing: an entity snapshot plus the wiring to its
/// filter controls and its render target.
///
/// Each view owns its snapshot handle and its own debounce timer, so
/// several listings (clients and suppliers side by side, say) coexist
/// without sharing any state.
pub struct FilterView {
    kind: EntityKind,
    profile: FieldProfile,
    snapshot: Arc<Vec<Record>>,
    provider: ProviderRef,
    sink: SinkRef,
    debouncer: Debouncer,
}

impl FilterView {
    /// Create a view over a snapshot using the kind's built-in profile
    pub fn new(
        kind: EntityKind,
        snapshot: Arc<Vec<Record>>,
        provider: ProviderRef,
        sink: SinkRef,
        config: &Config,
    ) -> Self {
        Self {
            kind,
            profile: kind.profile(),
            snapshot,
            provider,
            sink,
            debouncer: Debouncer::new(config.filter.debounce_delay()),
        }
    }

    /// The entity kind this view lists
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The field profile in use
    pub fn profile(&self) -> &FieldProfile {
        &self.profile
    }

    /// Handle to the snapshot this view filters
    pub fn snapshot(&self) -> Arc<Vec<Record>> {
        Arc::clone(&self.snapshot)
    }

    /// Swap in a freshly loaded snapshot. Views opened from the same
    /// registry entry are unaffected; they keep their own handle.
    pub fn replace_snapshot(&mut self, records: Vec<Record>) {
        log::info!("view {}: snapshot replaced, {} records", self.kind, records.len());
        self.snapshot = Arc::new(records);
    }

    /// Filter with the current control values and push the result to
    /// the render sink. This is the immediate path used by selects.
    pub fn refresh(&self) -> FilterResult {
        let criteria = self.provider.current();
        let result = engine::filter_records(&self.snapshot, &self.profile, &criteria);
        log::debug!(
            "view {}: {}/{} records pass",
            self.kind,
            result.stats.filtered_count,
            result.stats.total_count
        );
        self.sink.render_rows(&result.records);
        self.sink.render_stats(&result.stats);
        result
    }

    /// A select control changed: re-filter immediately
    pub fn on_select_change(&self) {
        self.refresh();
    }

    /// The free-text input changed: re-filter once it has been quiet
    /// for the debounce window. Control values are read when the timer
    /// fires, not when the keystroke arrives.
    pub fn on_text_input(&mut self) {
        let kind = self.kind;
        let profile = self.profile.clone();
        let snapshot = Arc::clone(&self.snapshot);
        let provider = Arc::clone(&self.provider);
        let sink = Arc::clone(&self.sink);

        self.debouncer.schedule(move || {
            let criteria = provider.current();
            let result = engine::filter_records(&snapshot, &profile, &criteria);
            log::debug!(
                "view {}: debounced pass, {}/{} records",
                kind,
                result.stats.filtered_count,
                result.stats.total_count
            );
            sink.render_rows(&result.records);
            sink.render_stats(&result.stats);
        });
    }

    /// Whether a debounced refresh is armed and has not fired yet
    pub fn refresh_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Control values held behind a lock, like a form the test can type into
    struct Controls(Mutex<Criteria>);

    impl Controls {
        fn new(criteria: Criteria) -> Arc<Self> {
            Arc::new(Self(Mutex::new(criteria)))
        }

        fn set(&self, criteria: Criteria) {
            *self.0.lock().unwrap() = criteria;
        }
    }

    impl CriteriaProvider for Controls {
        fn current(&self) -> Criteria {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        renders: AtomicUsize,
        last_names: Mutex<Vec<String>>,
        last_stats: Mutex<FilterStats>,
    }

    impl RenderSink for RecordingSink {
        fn render_rows(&self, records: &[Record]) {
            self.renders.fetch_add(1, Ordering::SeqCst);
            *self.last_names.lock().unwrap() =
                records.iter().map(|r| r.text("name")).collect();
        }

        fn render_stats(&self, stats: &FilterStats) {
            *self.last_stats.lock().unwrap() = *stats;
        }
    }

    fn sample_snapshot() -> Vec<Record> {
        vec![
            Record::from_value(json!({"name": "Dupont SARL", "balance": 150.0, "active": true})),
            Record::from_value(json!({"name": "Martin", "balance": -40.0, "active": false})),
            Record::from_value(json!({"name": "Leroy", "balance": 0.0, "active": true})),
        ]
    }

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_snapshot_set_not_loaded() {
        let set = SnapshotSet::new();
        let err = set.get(EntityKind::Tiers).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotLoaded);
    }

    #[test]
    fn test_snapshot_set_insert_and_get() {
        let mut set = SnapshotSet::new();
        set.insert(EntityKind::Tiers, sample_snapshot());
        assert!(set.contains(EntityKind::Tiers));
        assert!(!set.contains(EntityKind::Purchases));
        assert_eq!(set.get(EntityKind::Tiers).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_pushes_rows_and_stats() {
        let mut set = SnapshotSet::new();
        set.insert(EntityKind::Tiers, sample_snapshot());

        let controls = Controls::new(Criteria::new().with_sign(SignBucket::Debtor));
        let sink = Arc::new(RecordingSink::default());
        let view = set
            .view(EntityKind::Tiers, controls, Arc::clone(&sink) as SinkRef, &test_config())
            .unwrap();

        let result = view.refresh();

        assert_eq!(result.stats.filtered_count, 1);
        assert_eq!(sink.renders.load(Ordering::SeqCst), 1);
        assert_eq!(*sink.last_names.lock().unwrap(), vec!["Dupont SARL".to_string()]);
        assert_eq!(sink.last_stats.lock().unwrap().amount_sum, 150.0);
    }

    #[tokio::test]
    async fn test_select_change_is_immediate() {
        let mut set = SnapshotSet::new();
        set.insert(EntityKind::Tiers, sample_snapshot());

        let controls = Controls::new(Criteria::new());
        let sink = Arc::new(RecordingSink::default());
        let view = set
            .view(EntityKind::Tiers, controls, Arc::clone(&sink) as SinkRef, &test_config())
            .unwrap();

        view.on_select_change();

        // No timer involved: the render happened synchronously
        assert_eq!(sink.renders.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_input_burst_filters_once_with_final_text() {
        let mut set = SnapshotSet::new();
        set.insert(EntityKind::Tiers, sample_snapshot());

        let controls = Controls::new(Criteria::new());
        let sink = Arc::new(RecordingSink::default());
        let mut view = set
            .view(
                EntityKind::Tiers,
                Arc::clone(&controls) as ProviderRef,
                Arc::clone(&sink) as SinkRef,
                &test_config(),
            )
            .unwrap();

        // Five keystrokes inside one quiet window
        for text in ["m", "ma", "mar", "mart", "martin"] {
            controls.set(Criteria::new().with_search(text));
            view.on_text_input();
            tokio::time::advance(Duration::from_millis(50)).await;
        }
        assert!(view.refresh_pending());
        assert_eq!(sink.renders.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(400)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        assert_eq!(sink.renders.load(Ordering::SeqCst), 1);
        assert_eq!(*sink.last_names.lock().unwrap(), vec!["Martin".to_string()]);
    }

    #[tokio::test]
    async fn test_replace_snapshot_refreshes_from_new_data() {
        let mut set = SnapshotSet::new();
        set.insert(EntityKind::Tiers, sample_snapshot());

        let controls = Controls::new(Criteria::new());
        let sink = Arc::new(RecordingSink::default());
        let mut view = set
            .view(EntityKind::Tiers, controls, Arc::clone(&sink) as SinkRef, &test_config())
            .unwrap();

        view.replace_snapshot(vec![Record::from_value(json!({"name": "Nouveau"}))]);
        let result = view.refresh();

        assert_eq!(result.stats.total_count, 1);
        assert_eq!(*sink.last_names.lock().unwrap(), vec!["Nouveau".to_string()]);
    }

    #[tokio::test]
    async fn test_party_groups_combine_under_shared_criteria() {
        let mut set = SnapshotSet::new();
        set.insert(
            EntityKind::Tiers,
            vec![
                Record::from_value(json!({"name": "Client A", "balance": 10.0, "type": "client"})),
                Record::from_value(json!({"name": "Fournisseur B", "balance": -5.0, "type": "fournisseur"})),
            ],
        );

        let controls = Controls::new(Criteria::new());
        let snapshot = set.get(EntityKind::Tiers).unwrap();

        let clients: Vec<Record> = snapshot
            .iter()
            .filter(|r| r.party_kind() == Some(PartyKind::Client))
            .cloned()
            .collect();
        let suppliers: Vec<Record> = snapshot
            .iter()
            .filter(|r| r.party_kind() == Some(PartyKind::Supplier))
            .cloned()
            .collect();

        let profile = FieldProfile::tiers();
        let criteria = controls.current();
        let client_result = engine::filter_records(&clients, &profile, &criteria);
        let supplier_result = engine::filter_records(&suppliers, &profile, &criteria);

        let combined = FilterStats::combine([&client_result.stats, &supplier_result.stats]);
        assert_eq!(combined.filtered_count, 2);
        assert_eq!(combined.amount_sum, 5.0);
    }
}
