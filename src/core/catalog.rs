//! Static index catalog: categories, code tables and API naming helpers

use anyhow::Result;
use std::fmt::Display;
use std::str::FromStr;

/// Namespace prepended to every index code when talking to the basket API.
pub const API_CODE_PREFIX: &str = "IDX.UPBIT.";

const MARKET_NAMES: &[(&str, &str)] = &[
    ("UBMI", "UBMI"),
    ("UBAI", "UBAI"),
    ("UTTI", "UBMI 10"),
    ("UBAI_ST", "UBAI BTC quote"),
    ("UBMI_ST", "UBMI BTC quote"),
    ("UTHI", "UBMI 30"),
];

const STRATEGY_NAMES: &[(&str, &str)] = &[
    ("UBSI001", "Momentum Top 5"),
    ("UBSI002", "Low Volatility Top 5"),
    ("UBSI003", "Contrarian Top 5"),
    ("UBSI004", "BTC-ETH Duo"),
    ("UBSI005", "Global Price Gap Low 5"),
];

const THEME_NAMES: &[(&str, &str)] = &[
    ("THMIDX17", "BTC Group"),
    ("THMIDX18", "ETH Group"),
    ("THMIDX24", "Upbit Staking"),
];

const SECTOR_NAMES: &[(&str, &str)] = &[
    ("SCTIDXA", "Infrastructure"),
    ("SCTIDXA01", "Payment Infrastructure"),
    ("SCTIDXA02", "Network Infrastructure"),
    ("SCTIDXA02-01", "Interoperability/Bridges"),
    ("SCTIDXA02-02", "Enterprise Blockchain"),
    ("SCTIDXA03", "DApp Infrastructure"),
    ("SCTIDXA03-01", "Oracle"),
    ("SCTIDXA04", "User Infrastructure"),
    ("SCTIDXA04-01", "DID"),
    ("SCTIDXA04-02", "Medical"),
    ("SCTIDXA04-03", "Wallet/Messaging"),
    ("SCTIDXA05", "DePIN"),
    ("SCTIDXA05-01", "AI"),
    ("SCTIDXA05-02", "Data Infrastructure"),
    ("SCTIDXA05-03", "Storage"),
    ("SCTIDXB", "Smart Contract Platforms"),
    ("SCTIDXB01", "Monolithic Blockchain"),
    ("SCTIDXB02", "Modular Blockchain"),
    ("SCTIDXC", "DeFi"),
    ("SCTIDXC01", "Stablecoin Group"),
    ("SCTIDXC01-01", "Stablecoins"),
    ("SCTIDXC02", "Exchange"),
    ("SCTIDXC02-01", "DEX/Aggregator"),
    ("SCTIDXC03", "Deposit"),
    ("SCTIDXC03-01", "Lending"),
    ("SCTIDXD", "Culture/Entertainment"),
    ("SCTIDXD01", "Virtual World"),
    ("SCTIDXD01-01", "Metaverse"),
    ("SCTIDXD01-02", "NFT/Gaming"),
    ("SCTIDXD02", "Content"),
    ("SCTIDXD02-02", "Advertising"),
    ("SCTIDXD02-03", "Education/Other Content"),
    ("SCTIDXD03", "Community"),
    ("SCTIDXD03-01", "Social/DAO"),
    ("SCTIDXD04", "Fan Tokens"),
    ("SCTIDXE", "Meme"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Category {
    Market,
    Strategy,
    Theme,
    Sector,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 4] = [
        Category::Market,
        Category::Strategy,
        Category::Theme,
        Category::Sector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Market => "market",
            Category::Strategy => "strategy",
            Category::Theme => "theme",
            Category::Sector => "sector",
        }
    }

    /// Market and sector ratios are reported as percentages, strategy and
    /// theme ratios are passed through as the API reports them.
    pub fn ratio_multiplier(&self) -> f64 {
        match self {
            Category::Market | Category::Sector => 100.0,
            Category::Strategy | Category::Theme => 1.0,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "market" => Ok(Category::Market),
            "strategy" => Ok(Category::Strategy),
            "theme" => Ok(Category::Theme),
            "sector" => Ok(Category::Sector),
            _ => Err(anyhow::anyhow!("Invalid index category: {}", s)),
        }
    }
}

/// The (code, display name) table for a category, in catalog order.
pub fn indices(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Market => MARKET_NAMES,
        Category::Strategy => STRATEGY_NAMES,
        Category::Theme => THEME_NAMES,
        Category::Sector => SECTOR_NAMES,
    }
}

pub fn contains(code: &str, category: Category) -> bool {
    indices(category).iter().any(|(c, _)| *c == code)
}

/// Display name of `code` within `category`, or the code itself when the
/// table has no entry for it.
pub fn display_name_of<'a>(code: &'a str, category: Category) -> &'a str {
    indices(category)
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}

/// Category owning `code`, if any table lists it.
pub fn category_of(code: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|c| contains(code, *c))
}

/// Every catalog entry: markets first, then strategies, themes and sectors.
pub fn entries() -> impl Iterator<Item = (Category, &'static str)> {
    Category::ALL
        .into_iter()
        .flat_map(|category| indices(category).iter().map(move |(code, _)| (category, *code)))
}

pub fn api_code(code: &str) -> String {
    format!("{API_CODE_PREFIX}{code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_disjoint() {
        for (category, code) in entries() {
            assert_eq!(category_of(code), Some(category), "code {code}");
        }
    }

    #[test]
    fn test_entries_follow_catalog_order() {
        let entries: Vec<_> = entries().collect();
        assert_eq!(entries.len(), 6 + 5 + 3 + 36);
        assert_eq!(entries[0], (Category::Market, "UBMI"));
        assert_eq!(entries[6], (Category::Strategy, "UBSI001"));
        assert_eq!(entries[11], (Category::Theme, "THMIDX17"));
        assert_eq!(entries[14], (Category::Sector, "SCTIDXA"));
        assert_eq!(entries.last(), Some(&(Category::Sector, "SCTIDXE")));
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        assert_eq!(display_name_of("UTTI", Category::Market), "UBMI 10");
        assert_eq!(display_name_of("SCTIDXE", Category::Sector), "Meme");
        assert_eq!(display_name_of("UTTI", Category::Strategy), "UTTI");
        assert_eq!(display_name_of("NOPE", Category::Theme), "NOPE");
    }

    #[test]
    fn test_api_code() {
        assert_eq!(api_code("SCTIDXA02-01"), "IDX.UPBIT.SCTIDXA02-01");
        assert_eq!(api_code("UBMI"), "IDX.UPBIT.UBMI");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("MARKET".parse::<Category>().unwrap(), Category::Market);
        assert_eq!("theme".parse::<Category>().unwrap(), Category::Theme);
        assert!("index".parse::<Category>().is_err());
    }

    #[test]
    fn test_ratio_multiplier() {
        assert_eq!(Category::Market.ratio_multiplier(), 100.0);
        assert_eq!(Category::Sector.ratio_multiplier(), 100.0);
        assert_eq!(Category::Strategy.ratio_multiplier(), 1.0);
        assert_eq!(Category::Theme.ratio_multiplier(), 1.0);
    }
}
