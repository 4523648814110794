use super::error::QueryError;

/// Quote currencies a ticker may be listed against.
pub const VALID_PREFIXES: [&str; 3] = ["KRW-", "BTC-", "USDT-"];

pub fn is_valid_ticker(ticker: &str) -> bool {
    VALID_PREFIXES
        .iter()
        .any(|prefix| ticker.starts_with(prefix))
}

pub fn validate_ticker(ticker: &str) -> Result<&str, QueryError> {
    if is_valid_ticker(ticker) {
        Ok(ticker)
    } else {
        Err(QueryError::InvalidTicker(ticker.to_string()))
    }
}
