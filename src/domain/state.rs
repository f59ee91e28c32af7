use std::sync::Arc;

use serde::Serialize;

use crate::domain::market_data::{IndicatorSet, StockSnapshot, Symbol};

/// Process-wide fetch flags, not tracked per symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchState {
    pub loading: bool,
    pub refreshing: bool,
}

impl Default for FetchState {
    /// The dashboard starts out loading until the symbol list resolves.
    fn default() -> Self {
        Self { loading: true, refreshing: false }
    }
}

/// The single owned state object behind the dashboard.
///
/// Reads are free for anyone; writes go through the sync controller only.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    symbols: Vec<Symbol>,
    selection: Option<Symbol>,
    snapshot: Option<Arc<StockSnapshot>>,
    indicators: Option<Arc<IndicatorSet>>,
    fetch: FetchState,
    history_in_flight: usize,
    refreshes_in_flight: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn selection(&self) -> Option<&Symbol> {
        self.selection.as_ref()
    }

    pub fn is_selected(&self, symbol: &Symbol) -> bool {
        self.selection.as_ref() == Some(symbol)
    }

    pub fn snapshot(&self) -> Option<&Arc<StockSnapshot>> {
        self.snapshot.as_ref()
    }

    pub fn indicators(&self) -> Option<&Arc<IndicatorSet>> {
        self.indicators.as_ref()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.fetch.refreshing
    }

    pub(crate) fn set_symbols(&mut self, symbols: Vec<Symbol>) {
        self.symbols = symbols;
    }

    pub(crate) fn set_selection(&mut self, symbol: Symbol) {
        self.selection = Some(symbol);
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: StockSnapshot) {
        self.snapshot = Some(Arc::new(snapshot));
    }

    pub(crate) fn replace_indicators(&mut self, indicators: IndicatorSet) {
        self.indicators = Some(Arc::new(indicators));
    }

    /// Returns `true` when the flag actually changed
    pub(crate) fn set_loading(&mut self, loading: bool) -> bool {
        let changed = self.fetch.loading != loading;
        self.fetch.loading = loading;
        changed
    }

    /// The symbol list resolved. Never raises the flag, and leaves it up while a
    /// history load is still outstanding.
    pub(crate) fn end_symbol_load(&mut self) -> bool {
        let loading = self.fetch.loading && self.history_in_flight > 0;
        self.set_loading(loading)
    }

    pub(crate) fn begin_history_load(&mut self) -> bool {
        self.history_in_flight += 1;
        self.set_loading(true)
    }

    /// With `force_clear` the flag drops regardless of other history loads
    /// still in flight; otherwise it drops with the last one.
    pub(crate) fn end_history_load(&mut self, force_clear: bool) -> bool {
        self.history_in_flight = self.history_in_flight.saturating_sub(1);
        let loading = !force_clear && self.history_in_flight > 0;
        self.set_loading(loading)
    }

    pub(crate) fn begin_refresh(&mut self) {
        self.refreshes_in_flight += 1;
        self.fetch.refreshing = true;
    }

    /// `refreshing` clears only once the last overlapping refresh finishes.
    pub(crate) fn end_refresh(&mut self) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);
        self.fetch.refreshing = self.refreshes_in_flight > 0;
    }
}
