//! Basket documents as served by the index API, and the provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One constituent of an index basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Dotted market identifier, e.g. `CRIX.UPBIT.KRW-BTC`.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(
        default,
        rename = "componentRatio",
        skip_serializing_if = "Option::is_none"
    )]
    pub component_ratio: Option<f64>,
}

impl MarketEntry {
    /// Final segment of the market identifier.
    pub fn ticker(&self) -> &str {
        self.code.rsplit('.').next().unwrap_or(&self.code)
    }

    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    pub fn component_ratio(&self) -> f64 {
        self.component_ratio.unwrap_or(0.0)
    }
}

/// Raw per-index payload. Entry order is the API response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasketDocument {
    #[serde(default)]
    pub markets: Vec<MarketEntry>,
}

impl BasketDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

/// Result of fetching one index during a refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(BasketDocument),
    Failed(String),
}

impl FetchOutcome {
    pub fn from_result(result: Result<BasketDocument>) -> Self {
        match result {
            Ok(doc) => FetchOutcome::Fetched(doc),
            Err(e) => FetchOutcome::Failed(format!("{e:#}")),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// The fetched basket, or an empty one when the fetch failed.
    pub fn into_basket(self) -> BasketDocument {
        match self {
            FetchOutcome::Fetched(doc) => doc,
            FetchOutcome::Failed(_) => BasketDocument::empty(),
        }
    }
}

#[async_trait]
pub trait BasketProvider: Send + Sync {
    /// Fetches the basket for a bare index code such as `UBMI`.
    async fn fetch_basket(&self, code: &str) -> Result<BasketDocument>;
}
