use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::ResponsePolicy;
use crate::domain::{
    events::{Dataset, DashboardEvent, EventDispatcher, InMemoryEventDispatcher},
    logging::LogComponent,
    market_data::{MarketDataRepository, Symbol},
    state::DashboardState,
};
use crate::{log_debug, log_error, log_info, log_warn};

const COMPONENT: LogComponent = LogComponent::Application("SyncController");

/// Drives every remote fetch of the dashboard and owns its state.
///
/// All operations are futures meant for one logical thread. Mutations happen
/// between suspension points, so the `RefCell` is never borrowed across an
/// `.await`. Operations never fail: errors are logged, published as
/// [`DashboardEvent::FetchFailed`] and otherwise leave the state as it was.
pub struct SyncController<R> {
    repository: Rc<R>,
    state: Rc<RefCell<DashboardState>>,
    events: Rc<InMemoryEventDispatcher>,
    policy: ResponsePolicy,
}

impl<R> Clone for SyncController<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Rc::clone(&self.repository),
            state: Rc::clone(&self.state),
            events: Rc::clone(&self.events),
            policy: self.policy,
        }
    }
}

impl<R: MarketDataRepository> SyncController<R> {
    pub fn new(repository: R, policy: ResponsePolicy) -> Self {
        log_debug!(COMPONENT, "Creating sync controller (policy: {})", policy);
        Self {
            repository: Rc::new(repository),
            state: Rc::new(RefCell::new(DashboardState::new())),
            events: Rc::new(InMemoryEventDispatcher::new()),
            policy,
        }
    }

    /// Borrow the current state. Do not hold the guard across an `.await`.
    pub fn state(&self) -> Ref<'_, DashboardState> {
        self.state.borrow()
    }

    pub fn events(&self) -> &InMemoryEventDispatcher {
        &self.events
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Fetch the symbol universe. The first symbol becomes the selection only
    /// when nothing is selected yet; an existing choice is never overridden.
    pub async fn load_symbols(&self) {
        if let Some(symbol) = self.fetch_symbol_list().await {
            self.select_symbol(symbol).await;
        }
    }

    /// Store the symbol list and return the symbol to select, if any.
    async fn fetch_symbol_list(&self) -> Option<Symbol> {
        log_debug!(COMPONENT, "Loading symbol list");

        let first = match self.repository.fetch_symbols().await {
            Ok(symbols) => {
                let count = symbols.len();
                let first = {
                    let mut state = self.state.borrow_mut();
                    let first = match state.selection() {
                        None => symbols.first().cloned(),
                        Some(_) => None,
                    };
                    state.set_symbols(symbols);
                    first
                };
                log_info!(COMPONENT, "Loaded {} symbols", count);
                self.events.publish(DashboardEvent::SymbolsLoaded { count });
                first
            }
            Err(err) => {
                log_error!(COMPONENT, "Error fetching stocks: {}", err);
                self.events.publish(DashboardEvent::FetchFailed {
                    dataset: Dataset::Symbols,
                    symbol: None,
                    reason: err.to_string(),
                });
                None
            }
        };

        if self.state.borrow_mut().end_symbol_load() {
            self.publish_fetch_state();
        }
        first
    }

    /// Make `symbol` current and fetch its history and indicators.
    ///
    /// The two fetches run concurrently and land independently, in whatever
    /// order they complete. Re-selecting the current symbol is a no-op.
    pub async fn select_symbol(&self, symbol: Symbol) {
        if self.state.borrow().is_selected(&symbol) {
            log_debug!(COMPONENT, "{} already selected", symbol);
            return;
        }

        self.state.borrow_mut().set_selection(symbol.clone());
        log_info!(COMPONENT, "Selected {}", symbol);
        self.events.publish(DashboardEvent::SelectionChanged { symbol: symbol.clone() });

        futures::join!(self.load_history(&symbol), self.load_indicators(&symbol));
    }

    /// Fetch price and history for `symbol` and replace the snapshot.
    ///
    /// `loading` is raised for the duration and always lowered again, whether
    /// the fetch succeeds or fails.
    pub async fn load_history(&self, symbol: &Symbol) {
        if self.state.borrow_mut().begin_history_load() {
            self.publish_fetch_state();
        }

        let result = self.repository.fetch_snapshot(symbol).await;
        let accepted = self.accepts(symbol);

        match result {
            Ok(snapshot) if accepted => {
                self.state.borrow_mut().replace_snapshot(snapshot);
                log_debug!(COMPONENT, "Snapshot replaced for {}", symbol);
                self.events.publish(DashboardEvent::SnapshotReplaced { symbol: symbol.clone() });
            }
            Ok(_) => self.discard(Dataset::Snapshot, symbol),
            Err(err) => {
                log_error!(COMPONENT, "Error fetching stock data for {}: {}", symbol, err);
                self.events.publish(DashboardEvent::FetchFailed {
                    dataset: Dataset::Snapshot,
                    symbol: Some(symbol.clone()),
                    reason: err.to_string(),
                });
            }
        }

        let force_clear = self.policy == ResponsePolicy::LastWriterWins;
        if self.state.borrow_mut().end_history_load(force_clear) {
            self.publish_fetch_state();
        }
    }

    /// Fetch indicators for `symbol`. A failure keeps the previous indicators.
    pub async fn load_indicators(&self, symbol: &Symbol) {
        let result = self.repository.fetch_indicators(symbol).await;
        let accepted = self.accepts(symbol);

        match result {
            Ok(indicators) if accepted => {
                self.state.borrow_mut().replace_indicators(indicators);
                log_debug!(COMPONENT, "Indicators replaced for {}", symbol);
                self.events.publish(DashboardEvent::IndicatorsReplaced { symbol: symbol.clone() });
            }
            Ok(_) => self.discard(Dataset::Indicators, symbol),
            Err(err) => {
                log_error!(COMPONENT, "Error fetching stock analysis for {}: {}", symbol, err);
                self.events.publish(DashboardEvent::FetchFailed {
                    dataset: Dataset::Indicators,
                    symbol: Some(symbol.clone()),
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Pull-to-refresh.
    ///
    /// With a selection, history and indicators are re-fetched concurrently and
    /// `refreshing` drops only after both finish. Without one, the symbol list
    /// is fetched again and `refreshing` drops as soon as the list resolves;
    /// the fetches for a newly chosen symbol run under `loading` instead.
    /// Overlapping refreshes are allowed; the flag drops when the last of them
    /// completes.
    pub async fn refresh(&self) {
        self.state.borrow_mut().begin_refresh();
        self.publish_fetch_state();

        let selection = self.state.borrow().selection().cloned();
        let next = match selection {
            Some(symbol) => {
                log_info!(COMPONENT, "Refreshing {}", symbol);
                futures::join!(self.load_history(&symbol), self.load_indicators(&symbol));
                None
            }
            None => {
                log_info!(COMPONENT, "Refreshing without selection, reloading symbols");
                self.fetch_symbol_list().await
            }
        };

        self.state.borrow_mut().end_refresh();
        self.publish_fetch_state();

        if let Some(symbol) = next {
            self.select_symbol(symbol).await;
        }
    }

    fn accepts(&self, issued_for: &Symbol) -> bool {
        match self.policy {
            ResponsePolicy::LastWriterWins => true,
            ResponsePolicy::DiscardStale => self.state.borrow().is_selected(issued_for),
        }
    }

    fn discard(&self, dataset: Dataset, issued_for: &Symbol) {
        log_warn!(COMPONENT, "Discarding stale {:?} response for {}", dataset, issued_for);
        self.events.publish(DashboardEvent::StaleResponseDiscarded {
            dataset,
            issued_for: issued_for.clone(),
        });
    }

    fn publish_fetch_state(&self) {
        let fetch = self.state.borrow().fetch_state();
        self.events.publish(DashboardEvent::FetchStateChanged {
            loading: fetch.loading,
            refreshing: fetch.refreshing,
        });
    }
}
