//! Keeps the active index model fresh and answers queries against it

use super::basket::{BasketProvider, FetchOutcome};
use super::catalog::{self, Category};
use super::error::QueryError;
use super::model::IndexModel;
use crate::store::{Snapshot, SnapshotStore};
use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// What a completed refresh fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub cache_date: NaiveDate,
    /// Indices that returned at least one market.
    pub fetched: usize,
    /// Indices the API returned with no markets.
    pub empty: Vec<String>,
    /// Indices whose fetch failed, with the reason. These are stored as empty.
    pub failed: Vec<(String, String)>,
}

impl RefreshReport {
    fn new(cache_date: NaiveDate) -> Self {
        Self {
            cache_date,
            fetched: 0,
            empty: Vec::new(),
            failed: Vec::new(),
        }
    }
}

struct ActiveIndex {
    cache_date: Option<NaiveDate>,
    model: Arc<IndexModel>,
}

pub struct IndexService {
    provider: Arc<dyn BasketProvider>,
    store: Arc<dyn SnapshotStore>,
    active: RwLock<Arc<ActiveIndex>>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl IndexService {
    pub fn new(provider: Arc<dyn BasketProvider>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            provider,
            store,
            active: RwLock::new(Arc::new(ActiveIndex {
                cache_date: None,
                model: Arc::new(IndexModel::default()),
            })),
        }
    }

    /// Restores the stored snapshot, or refreshes from the API when there is
    /// no usable one. Returns the report of the refresh, if one ran.
    pub async fn init(&self, progress: &(dyn Fn() + Sync)) -> Option<RefreshReport> {
        if let Some(snapshot) = self.store.load() {
            debug!(
                "Cache loaded from disk (last updated: {})",
                snapshot.cache_date
            );
            self.publish(&snapshot).await;
            return None;
        }
        self.refresh(progress).await
    }

    /// Refreshes unless today's data is already active.
    pub async fn refresh(&self, progress: &(dyn Fn() + Sync)) -> Option<RefreshReport> {
        self.refresh_as_of(today(), progress).await
    }

    pub async fn refresh_as_of(
        &self,
        date: NaiveDate,
        progress: &(dyn Fn() + Sync),
    ) -> Option<RefreshReport> {
        if self.cache_date().await == Some(date) {
            info!("Using cached index data");
            return None;
        }
        Some(self.fetch_all(date, progress).await)
    }

    /// Refreshes regardless of the active cache date.
    pub async fn force_refresh(&self, progress: &(dyn Fn() + Sync)) -> RefreshReport {
        self.fetch_all(today(), progress).await
    }

    async fn fetch_all(&self, date: NaiveDate, progress: &(dyn Fn() + Sync)) -> RefreshReport {
        let fetches = catalog::entries().map(|(_, code)| async move {
            let outcome = FetchOutcome::from_result(self.provider.fetch_basket(code).await);
            progress();
            (code, outcome)
        });
        let outcomes = join_all(fetches).await;

        let mut report = RefreshReport::new(date);
        let mut api_cache = BTreeMap::new();
        for (code, outcome) in outcomes {
            match &outcome {
                FetchOutcome::Failed(reason) => {
                    error!("Error fetching data for index {}: {}", code, reason);
                    report.failed.push((code.to_string(), reason.clone()));
                }
                FetchOutcome::Fetched(doc) if doc.is_empty() => {
                    report.empty.push(code.to_string());
                }
                FetchOutcome::Fetched(_) => report.fetched += 1,
            }
            api_cache.insert(catalog::api_code(code), outcome.into_basket());
        }

        let snapshot = Snapshot {
            cache_date: date,
            api_cache,
        };
        self.publish(&snapshot).await;
        self.store.save(&snapshot);

        info!(
            fetched = report.fetched,
            empty = report.empty.len(),
            failed = report.failed.len(),
            "Index data updated and cached for {}",
            date
        );
        report
    }

    /// Builds a model from the snapshot off to the side, then swaps it in.
    async fn publish(&self, snapshot: &Snapshot) {
        let active = Arc::new(ActiveIndex {
            cache_date: Some(snapshot.cache_date),
            model: Arc::new(IndexModel::build(&snapshot.api_cache)),
        });
        *self.active.write().await = active;
    }

    async fn active(&self) -> Arc<ActiveIndex> {
        Arc::clone(&*self.active.read().await)
    }

    pub async fn cache_date(&self) -> Option<NaiveDate> {
        self.active().await.cache_date
    }

    pub async fn model(&self) -> Arc<IndexModel> {
        Arc::clone(&self.active().await.model)
    }

    pub async fn tickers_of(&self, code: &str, category: Category) -> Vec<(String, f64)> {
        self.model().await.tickers_of(code, category)
    }

    pub async fn try_indices_of(
        &self,
        ticker: &str,
        category: Category,
    ) -> Result<Vec<(String, String)>, QueryError> {
        self.model().await.indices_of(ticker, category)
    }

    /// Like [`Self::try_indices_of`], but an invalid ticker is logged and
    /// reads as no memberships.
    pub async fn indices_of(&self, ticker: &str, category: Category) -> Vec<(String, String)> {
        self.try_indices_of(ticker, category)
            .await
            .unwrap_or_else(|e| {
                warn!("{}", e);
                Vec::new()
            })
    }

    pub async fn ranked_tickers(&self, code: &str) -> Vec<String> {
        self.model().await.ranked_tickers(code)
    }

    pub fn display_name_of<'a>(&self, code: &'a str, category: Category) -> &'a str {
        catalog::display_name_of(code, category)
    }
}
