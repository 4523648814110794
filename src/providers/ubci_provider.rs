use crate::core::basket::{BasketDocument, BasketProvider};
use crate::core::catalog;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://ubci-api.ubcindex.com";
const BASKETS_PATH: &str = "/v1/crix/index/baskets";

/// Fetches index baskets from the UBCI API. One attempt per call, no retry.
pub struct UbciProvider {
    base_url: String,
    client: reqwest::Client,
}

impl UbciProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ubci/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn basket_url(&self, code: &str) -> String {
        format!(
            "{}{}?code={}",
            self.base_url,
            BASKETS_PATH,
            catalog::api_code(code)
        )
    }
}

#[async_trait]
impl BasketProvider for UbciProvider {
    #[instrument(name = "UbciBasketFetch", skip(self), fields(code = %code))]
    async fn fetch_basket(&self, code: &str) -> Result<BasketDocument> {
        let url = self.basket_url(code);
        debug!("Requesting basket from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request for index: {code}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error: {} for index: {}", status, code));
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for index: {code}"))?;

        let doc: BasketDocument = serde_json::from_str(&response_text).with_context(|| {
            format!("Failed to parse basket response for index: {code}. Response: '{response_text}'")
        })?;

        debug!("Received {} markets for {}", doc.markets.len(), code);
        Ok(doc)
    }
}
