//! Tresoweb main entry point

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use tresoweb_config::{Config, DisplayConfig};
use tresoweb_core::{
    engine, Criteria, CriteriaProvider, EntityKind, FieldProfile, FilterStats, PartyKind, Record,
    RenderSink, SnapshotSet,
};
use tresoweb_store::{JsonRecordStore, RecordStore};
use tresoweb_utils::format_amount;

#[derive(Parser, Debug)]
#[command(name = "tresoweb")]
#[command(author = "Tresoweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Treasury back-office filter console", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Entity list to filter: tiers, transactions, purchases
    #[arg(short, long, default_value = "tiers")]
    entity: String,

    /// Free-text search over the entity's text fields
    #[arg(short, long)]
    search: Option<String>,

    /// Sign bucket: debtor, creditor, balanced
    #[arg(long)]
    sign: Option<String>,

    /// Date bucket: recent, this_month, this_quarter, older
    #[arg(long)]
    date: Option<String>,

    /// Status bucket: active, inactive
    #[arg(long)]
    status: Option<String>,
}

/// The console stands in for the browser's filter form: the control
/// values come from the flags and stay fixed for the whole run.
struct CliControls {
    criteria: Criteria,
}

impl CriteriaProvider for CliControls {
    fn current(&self) -> Criteria {
        self.criteria.clone()
    }
}

/// Renders listing rows and the summary line to stdout
struct ConsoleSink {
    profile: FieldProfile,
    display: DisplayConfig,
}

impl RenderSink for ConsoleSink {
    fn render_rows(&self, records: &[Record]) {
        for record in records {
            let label = self
                .profile
                .text_fields
                .iter()
                .map(|field| record.text(field))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            let amount = record.amount(&self.profile.amount_field);
            println!(
                "{:>14}  {}",
                format_amount(amount, self.display.decimal_places, &self.display.thousands_separator),
                label
            );
        }
    }

    fn render_stats(&self, stats: &FilterStats) {
        println!(
            "{} of {} records, sum {} {}",
            stats.filtered_count,
            stats.total_count,
            format_amount(stats.amount_sum, self.display.decimal_places, &self.display.thousands_separator),
            self.display.currency
        );
    }
}

fn build_criteria(args: &Args) -> anyhow::Result<Criteria> {
    let mut criteria = Criteria::new();
    if let Some(search) = &args.search {
        criteria = criteria.with_search(search.clone());
    }
    if let Some(sign) = &args.sign {
        criteria = criteria.with_sign(sign.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(date) = &args.date {
        criteria = criteria.with_date(date.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(status) = &args.status {
        criteria = criteria.with_status(status.parse().map_err(anyhow::Error::msg)?);
    }
    Ok(criteria)
}

fn init_logging(config: &Config) {
    let level = match config.logging.level.as_str() {
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if args.config.exists() {
        Config::load(args.config.clone())?
    } else {
        Config::default()
    };
    init_logging(&config);

    if !args.config.exists() {
        log::warn!("config file {} not found, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let kind: EntityKind = args.entity.parse().map_err(anyhow::Error::msg)?;
    let criteria = build_criteria(&args)?;

    let store = JsonRecordStore::new(config.data.path.clone()).with_files(
        config.data.tiers_file.as_str(),
        config.data.transactions_file.as_str(),
        config.data.purchases_file.as_str(),
    );

    log::info!("loading {} snapshot from {}", kind, config.data.path.display());
    let records = store.load_records(kind).await?;

    let mut snapshots = SnapshotSet::new();
    snapshots.insert(kind, records);

    let provider = Arc::new(CliControls { criteria: criteria.clone() });
    let sink = Arc::new(ConsoleSink {
        profile: kind.profile(),
        display: config.display.clone(),
    });

    let view = snapshots.view(kind, provider, sink, &config)?;
    view.refresh();

    // The tiers page shows clients and suppliers as separate listings
    // sharing one filter form; reproduce its combined summary here.
    if kind == EntityKind::Tiers {
        print_party_breakdown(&snapshots, &criteria, &config)?;
    }

    Ok(())
}

fn print_party_breakdown(
    snapshots: &SnapshotSet,
    criteria: &Criteria,
    config: &Config,
) -> anyhow::Result<()> {
    let snapshot = snapshots.get(EntityKind::Tiers)?;
    let profile = EntityKind::Tiers.profile();

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

    let client_stats = engine::filter_records(&clients, &profile, criteria).stats;
    let supplier_stats = engine::filter_records(&suppliers, &profile, criteria).stats;
    let combined = FilterStats::combine([&client_stats, &supplier_stats]);

    println!(
        "clients {} of {}, suppliers {} of {}, combined sum {} {}",
        client_stats.filtered_count,
        client_stats.total_count,
        supplier_stats.filtered_count,
        supplier_stats.total_count,
        format_amount(
            combined.amount_sum,
            config.display.decimal_places,
            &config.display.thousands_separator
        ),
        config.display.currency
    );

    Ok(())
}
