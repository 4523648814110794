//! Normalized, cross-referenced view of all fetched baskets

use super::basket::BasketDocument;
use super::catalog::{self, Category};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Everything known about one ticker across the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerInfo {
    /// Index codes per category, in discovery order. The key set is the set
    /// of categories the ticker appears in.
    pub index_codes: BTreeMap<Category, Vec<String>>,
    pub weights: HashMap<String, f64>,
    pub component_ratios: HashMap<String, f64>,
}

impl TickerInfo {
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.index_codes.keys().copied()
    }

    pub fn codes(&self, category: Category) -> &[String] {
        self.index_codes
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn belongs_to(&self, category: Category, code: &str) -> bool {
        self.codes(category).iter().any(|c| c == code)
    }

    pub fn weight(&self, code: &str) -> f64 {
        self.weights.get(code).copied().unwrap_or(0.0)
    }

    pub fn component_ratio(&self, code: &str) -> f64 {
        self.component_ratios.get(code).copied().unwrap_or(0.0)
    }
}

/// Immutable index model. Rebuilt from scratch on every refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexModel {
    pub(crate) ticker_info: HashMap<String, TickerInfo>,
    /// Tickers per index code in API response order.
    pub(crate) index_to_tickers: HashMap<String, Vec<String>>,
}

impl IndexModel {
    /// Builds a model from raw baskets keyed by API code (`IDX.UPBIT.UBMI`).
    ///
    /// Baskets are applied in catalog order, so the result depends only on
    /// the basket contents and never on the map's iteration order. Catalog
    /// entries without a basket are skipped; keys outside the catalog are
    /// ignored.
    pub fn build(baskets: &BTreeMap<String, BasketDocument>) -> Self {
        let mut builder = IndexModelBuilder::new();
        for (category, code) in catalog::entries() {
            if let Some(doc) = baskets.get(&catalog::api_code(code)) {
                builder.rebuild(code, category, doc);
            }
        }
        let model = builder.finish();
        debug!(
            tickers = model.ticker_count(),
            indices = model.index_to_tickers.len(),
            "Index model built"
        );
        model
    }

    pub fn ticker_info(&self, ticker: &str) -> Option<&TickerInfo> {
        self.ticker_info.get(ticker)
    }

    /// Tickers of `code` in API response order.
    pub fn index_tickers(&self, code: &str) -> &[String] {
        self.index_to_tickers
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn ticker_count(&self) -> usize {
        self.ticker_info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticker_info.is_empty() && self.index_to_tickers.is_empty()
    }
}

/// Accumulates baskets into an [`IndexModel`].
///
/// `rebuild` is not idempotent: applying the same basket twice records the
/// index code twice for each of its tickers. A full rebuild starts from a new
/// builder.
#[derive(Debug, Default)]
pub struct IndexModelBuilder {
    model: IndexModel,
}

impl IndexModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, code: &str, category: Category, doc: &BasketDocument) {
        for entry in &doc.markets {
            let ticker = entry.ticker();
            let info = self.model.ticker_info.entry(ticker.to_string()).or_default();

            info.weights.insert(code.to_string(), entry.weight());
            info.component_ratios
                .insert(code.to_string(), entry.component_ratio());
            info.index_codes
                .entry(category)
                .or_default()
                .push(code.to_string());

            self.model
                .index_to_tickers
                .entry(code.to_string())
                .or_default()
                .push(ticker.to_string());
        }
        debug!(code, %category, tickers = doc.markets.len(), "Processed basket");
    }

    pub fn finish(self) -> IndexModel {
        self.model
    }
}
