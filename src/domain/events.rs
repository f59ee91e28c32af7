use std::cell::RefCell;
use std::fmt::Debug;

use crate::domain::market_data::Symbol;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Which remote dataset an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Symbols,
    Snapshot,
    Indicators,
}

/// Published after every mutation of the dashboard state
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SymbolsLoaded { count: usize },
    SelectionChanged { symbol: Symbol },
    SnapshotReplaced { symbol: Symbol },
    IndicatorsReplaced { symbol: Symbol },
    FetchStateChanged { loading: bool, refreshing: bool },
    StaleResponseDiscarded { dataset: Dataset, issued_for: Symbol },
    FetchFailed { dataset: Dataset, symbol: Option<Symbol>, reason: String },
}

impl DomainEvent for DashboardEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::SymbolsLoaded { .. } => "SymbolsLoaded",
            DashboardEvent::SelectionChanged { .. } => "SelectionChanged",
            DashboardEvent::SnapshotReplaced { .. } => "SnapshotReplaced",
            DashboardEvent::IndicatorsReplaced { .. } => "IndicatorsReplaced",
            DashboardEvent::FetchStateChanged { .. } => "FetchStateChanged",
            DashboardEvent::StaleResponseDiscarded { .. } => "StaleResponseDiscarded",
            DashboardEvent::FetchFailed { .. } => "FetchFailed",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish(&self, event: DashboardEvent);
}

type Handler = Box<dyn Fn(&DashboardEvent)>;

/// Simple in-memory event dispatcher.
///
/// Handlers run synchronously inside `publish`; they must not publish again.
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    handlers: RefCell<Vec<Handler>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&DashboardEvent) + 'static,
    {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish(&self, event: DashboardEvent) {
        for handler in self.handlers.borrow().iter() {
            handler(&event);
        }
    }
}
