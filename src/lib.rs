pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::{index, refresh, ticker, ui};
use crate::core::catalog::{self, Category};
use crate::core::config::AppConfig;
use crate::core::{IndexService, ticker as ticker_rules};
use crate::providers::UbciProvider;
use crate::store::DiskStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// A command the binary resolved from its arguments. Codes and tickers are
/// expected upper-cased.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Print the index table of a category. Needs no index data.
    List(Category),
    /// Print the ranked tickers of one index of a category.
    Tickers { category: Category, index: String },
    /// An index code or a ticker, resolved at run time.
    Query(String),
    /// Refetch every basket regardless of the cache date.
    Refresh,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    run_with_config(command, &config).await
}

pub async fn run_with_config(command: AppCommand, config: &AppConfig) -> Result<()> {
    info!("ubci starting...");

    if let AppCommand::List(category) = command {
        println!("{}", index::render_listing(category));
        return Ok(());
    }

    if let AppCommand::Tickers {
        category,
        index: code,
    } = &command
        && !catalog::contains(code, *category)
    {
        println!("{}", index::render_invalid_index(*category, code));
        return Ok(());
    }

    let provider = Arc::new(UbciProvider::new(config.base_url())?);
    let store = Arc::new(DiskStore::new(config.cache_file_path()?));
    let service = IndexService::new(provider, store);

    let pb = ui::new_progress_bar(catalog::entries().count() as u64, true);
    pb.set_message("Fetching index baskets");
    let tick = || pb.inc(1);

    if command == AppCommand::Refresh {
        let report = service.force_refresh(&tick).await;
        pb.finish_and_clear();
        println!("{}", refresh::render_report(&report));
        return Ok(());
    }

    if let Some(report) = service.init(&tick).await {
        debug!(
            fetched = report.fetched,
            failed = report.failed.len(),
            "Index data refreshed on startup"
        );
    }
    pb.finish_and_clear();

    match command {
        AppCommand::Tickers {
            category,
            index: code,
        } => {
            let tickers = service.tickers_of(&code, category).await;
            println!("{}", index::render_tickers(category, &code, &tickers));
        }
        AppCommand::Query(query) => run_query(&service, &query).await,
        AppCommand::List(_) | AppCommand::Refresh => {}
    }
    Ok(())
}

async fn run_query(service: &IndexService, query: &str) {
    if let Some(category) = catalog::category_of(query) {
        let tickers = service.tickers_of(query, category).await;
        println!("{}", index::render_tickers(category, query, &tickers));
        return;
    }

    if ticker_rules::is_valid_ticker(query) {
        let mut memberships = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            memberships.push((category, service.indices_of(query, category).await));
        }
        println!("{}", ticker::render_ticker_info(query, &memberships));
        return;
    }

    println!(
        "{}",
        ui::style_text(
            &format!("'{query}' is neither a known index nor a ticker"),
            ui::StyleType::Error
        )
    );
}
