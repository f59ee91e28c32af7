pub mod wire;

use serde::de::DeserializeOwned;

use crate::domain::{
    errors::{DashboardError, NetworkResult},
    logging::LogComponent,
    market_data::{IndicatorSet, MarketDataRepository, StockSnapshot, Symbol},
};
use crate::{log_debug, log_error, log_warn};
use wire::{AnalysisResponse, StockResponse, StocksResponse};

const HTTP: LogComponent = LogComponent::Infrastructure("HTTP");
const API: LogComponent = LogComponent::Infrastructure("StockApi");

/// HTTP client for the stock analysis service.
///
/// Plain request/response, no auth. Uses the browser fetch API on wasm32 and
/// `reqwest` everywhere else.
#[derive(Clone)]
pub struct StockApiClient {
    base_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl StockApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stocks_url(&self) -> String {
        format!("{}/api/stocks", self.base_url)
    }

    pub fn stock_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/stock/{}", self.base_url, symbol.value())
    }

    pub fn analysis_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/analysis/{}", self.base_url, symbol.value())
    }

    /// GET `url` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> NetworkResult<T> {
        log_debug!(HTTP, "🌐 GET: {}", url);

        let body = self.get_text(url).await.inspect_err(|e| log_error!(HTTP, "{} -> {}", url, e))?;

        log_debug!(HTTP, "✅ GET response: {} bytes", body.len());

        wire::decode(&body)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn get_text(&self, url: &str) -> NetworkResult<String> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::network(format!("HTTP error: {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| DashboardError::network(format!("Failed to read response: {e}")))
    }

    #[cfg(target_arch = "wasm32")]
    async fn get_text(&self, url: &str) -> NetworkResult<String> {
        use gloo_net::http::Request;

        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::network(format!("Request failed: {e:?}")))?;

        if !response.ok() {
            return Err(DashboardError::network(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DashboardError::network(format!("Failed to read response: {e:?}")))
    }
}

impl MarketDataRepository for StockApiClient {
    async fn fetch_symbols(&self) -> NetworkResult<Vec<Symbol>> {
        let response: StocksResponse = self.get_json(&self.stocks_url()).await?;
        // Blank entries carry no symbol; drop them rather than fail the list.
        Ok(response.stocks.into_iter().filter_map(|s| Symbol::new(s).ok()).collect())
    }

    async fn fetch_snapshot(&self, symbol: &Symbol) -> NetworkResult<StockSnapshot> {
        let response: StockResponse = self.get_json(&self.stock_url(symbol)).await?;
        log_debug!(API, "📈 Snapshot for {} (cached: {})", symbol, response.cached);
        Ok(response.data)
    }

    async fn fetch_indicators(&self, symbol: &Symbol) -> NetworkResult<IndicatorSet> {
        let response: AnalysisResponse = self.get_json(&self.analysis_url(symbol)).await?;
        if let Some(reason) = &response.indicators.error {
            log_warn!(API, "Analysis for {} reported an error: {}", symbol, reason);
        }
        Ok(response.indicators)
    }
}
