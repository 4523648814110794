//! Membership and ranking queries over a built [`IndexModel`]

use super::catalog::{self, Category};
use super::error::QueryError;
use super::model::{IndexModel, TickerInfo};
use super::ticker::validate_ticker;
use std::cmp::Ordering;

/// Descending by weight, then component ratio. Used with a stable sort so
/// full ties keep the API response order.
fn by_rank_desc(a: (f64, f64), b: (f64, f64)) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl IndexModel {
    fn rank_key(&self, ticker: &str, code: &str) -> (f64, f64) {
        self.ticker_info(ticker)
            .map_or((0.0, 0.0), |info| {
                (info.weight(code), info.component_ratio(code))
            })
    }

    /// Tickers of index `code` with their component ratio, highest weight
    /// first.
    ///
    /// Only tickers whose own record lists `code` under `category` are kept.
    /// Sector codes must also be known to the sector table. Ratios are
    /// scaled by [`Category::ratio_multiplier`].
    pub fn tickers_of(&self, code: &str, category: Category) -> Vec<(String, f64)> {
        if category == Category::Sector && !catalog::contains(code, Category::Sector) {
            return Vec::new();
        }

        let mut members: Vec<(&str, &TickerInfo)> = self
            .index_tickers(code)
            .iter()
            .filter_map(|ticker| {
                self.ticker_info(ticker)
                    .filter(|info| info.belongs_to(category, code))
                    .map(|info| (ticker.as_str(), info))
            })
            .collect();

        members.sort_by(|(_, a), (_, b)| {
            by_rank_desc(
                (a.weight(code), a.component_ratio(code)),
                (b.weight(code), b.component_ratio(code)),
            )
        });

        let multiplier = category.ratio_multiplier();
        members
            .into_iter()
            .map(|(ticker, info)| (ticker.to_string(), info.component_ratio(code) * multiplier))
            .collect()
    }

    /// Index codes of `category` containing `ticker`, paired with their
    /// display names.
    ///
    /// Market codes are deduplicated, keeping the first occurrence. Other
    /// categories are returned as discovered, duplicates included.
    pub fn indices_of(
        &self,
        ticker: &str,
        category: Category,
    ) -> Result<Vec<(String, String)>, QueryError> {
        let ticker = validate_ticker(ticker)?;

        let Some(info) = self.ticker_info(ticker) else {
            return Ok(Vec::new());
        };

        let mut codes: Vec<&str> = info.codes(category).iter().map(String::as_str).collect();
        if category == Category::Market {
            let mut seen = std::collections::HashSet::new();
            codes.retain(|code| seen.insert(*code));
        }

        Ok(codes
            .into_iter()
            .map(|code| {
                (
                    code.to_string(),
                    catalog::display_name_of(code, category).to_string(),
                )
            })
            .collect())
    }

    /// All tickers of `code` ranked by weight and component ratio, without
    /// any category check.
    pub fn ranked_tickers(&self, code: &str) -> Vec<String> {
        let mut tickers: Vec<&String> = self.index_tickers(code).iter().collect();
        tickers.sort_by(|a, b| by_rank_desc(self.rank_key(a, code), self.rank_key(b, code)));
        tickers.into_iter().cloned().collect()
    }
}
