use std::future::Future;

use crate::domain::errors::NetworkResult;
use crate::domain::market_data::{IndicatorSet, StockSnapshot, Symbol};

/// Source of market data consumed by the sync controller.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// logical thread (browser event loop or a local executor).
pub trait MarketDataRepository {
    /// Available symbol universe, in display order
    fn fetch_symbols(&self) -> impl Future<Output = NetworkResult<Vec<Symbol>>>;

    /// Price summary and history for `symbol`
    fn fetch_snapshot(&self, symbol: &Symbol) -> impl Future<Output = NetworkResult<StockSnapshot>>;

    /// Technical indicators for `symbol`
    fn fetch_indicators(
        &self,
        symbol: &Symbol,
    ) -> impl Future<Output = NetworkResult<IndicatorSet>>;
}
