#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use stock_monitor::domain::errors::{DashboardError, NetworkResult};
use stock_monitor::domain::events::DashboardEvent;
use stock_monitor::domain::market_data::{
    Historical, IndicatorSet, MarketDataRepository, PriceInfo, StockSnapshot, Symbol, Trend,
};
use stock_monitor::{ResponsePolicy, SyncController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Symbols,
    Snapshot,
    Indicators,
}

type Key = (Call, Option<Symbol>);

enum Reply {
    Symbols(NetworkResult<Vec<Symbol>>),
    Snapshot(NetworkResult<StockSnapshot>),
    Indicators(NetworkResult<IndicatorSet>),
}

/// Repository whose requests stay pending until the test answers them, in
/// any order it likes.
#[derive(Default)]
pub struct ScriptedRepository {
    pending: RefCell<HashMap<Key, VecDeque<oneshot::Sender<Reply>>>>,
    calls: RefCell<Vec<Key>>,
}

impl ScriptedRepository {
    fn request(&self, call: Call, symbol: Option<&Symbol>) -> oneshot::Receiver<Reply> {
        let key = (call, symbol.cloned());
        let (tx, rx) = oneshot::channel();
        self.calls.borrow_mut().push(key.clone());
        self.pending.borrow_mut().entry(key).or_default().push_back(tx);
        rx
    }

    fn reply(&self, call: Call, symbol: Option<&Symbol>, reply: Reply) {
        let key = (call, symbol.cloned());
        let sender = self
            .pending
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| panic!("no pending request for {:?}", key));
        if sender.send(reply).is_err() {
            panic!("request for {:?} was dropped", key);
        }
    }

    pub fn respond_symbols(&self, result: NetworkResult<Vec<Symbol>>) {
        self.reply(Call::Symbols, None, Reply::Symbols(result));
    }

    pub fn respond_snapshot(&self, symbol: &Symbol, result: NetworkResult<StockSnapshot>) {
        self.reply(Call::Snapshot, Some(symbol), Reply::Snapshot(result));
    }

    pub fn respond_indicators(&self, symbol: &Symbol, result: NetworkResult<IndicatorSet>) {
        self.reply(Call::Indicators, Some(symbol), Reply::Indicators(result));
    }

    pub fn pending(&self, call: Call, symbol: Option<&Symbol>) -> usize {
        let key = (call, symbol.cloned());
        self.pending.borrow().get(&key).map_or(0, VecDeque::len)
    }

    pub fn call_count(&self, call: Call) -> usize {
        self.calls.borrow().iter().filter(|(c, _)| *c == call).count()
    }
}

async fn await_reply(rx: oneshot::Receiver<Reply>) -> NetworkResult<Reply> {
    rx.await.map_err(|_| DashboardError::network("request abandoned"))
}

impl MarketDataRepository for ScriptedRepository {
    async fn fetch_symbols(&self) -> NetworkResult<Vec<Symbol>> {
        match await_reply(self.request(Call::Symbols, None)).await? {
            Reply::Symbols(result) => result,
            _ => Err(DashboardError::network("mismatched reply")),
        }
    }

    async fn fetch_snapshot(&self, symbol: &Symbol) -> NetworkResult<StockSnapshot> {
        match await_reply(self.request(Call::Snapshot, Some(symbol))).await? {
            Reply::Snapshot(result) => result,
            _ => Err(DashboardError::network("mismatched reply")),
        }
    }

    async fn fetch_indicators(&self, symbol: &Symbol) -> NetworkResult<IndicatorSet> {
        match await_reply(self.request(Call::Indicators, Some(symbol))).await? {
            Reply::Indicators(result) => result,
            _ => Err(DashboardError::network("mismatched reply")),
        }
    }
}

/// Controller plus the local executor that drives it
pub struct Harness {
    pub pool: LocalPool,
    pub controller: SyncController<ScriptedRepository>,
    pub events: Rc<RefCell<Vec<DashboardEvent>>>,
}

impl Harness {
    pub fn new(policy: ResponsePolicy) -> Self {
        let controller = SyncController::new(ScriptedRepository::default(), policy);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.events().subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Self { pool: LocalPool::new(), controller, events }
    }

    pub fn repo(&self) -> &ScriptedRepository {
        self.controller.repository()
    }

    pub fn spawn<F, Fut>(&mut self, op: F)
    where
        F: FnOnce(SyncController<ScriptedRepository>) -> Fut,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let fut = op(self.controller.clone());
        self.pool.spawner().spawn_local(fut).expect("spawn on local pool");
        self.pool.run_until_stalled();
    }

    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Boot with `symbols` and settle the initial selection's fetches
    pub fn boot(&mut self, symbols: &[&str]) {
        let symbols: Vec<Symbol> = symbols.iter().map(|s| Symbol::new(*s).unwrap()).collect();
        self.spawn(|c| async move { c.load_symbols().await });
        self.repo().respond_symbols(Ok(symbols.clone()));
        self.settle();
        if let Some(first) = symbols.first() {
            self.repo().respond_snapshot(first, Ok(snapshot(first.value(), &[1.0, 2.0])));
            self.repo().respond_indicators(first, Ok(indicators(50.0)));
            self.settle();
        }
        self.events.borrow_mut().clear();
    }

    pub fn company(&self) -> Option<String> {
        let state = self.controller.state();
        state.snapshot().and_then(|s| s.price.as_ref()).and_then(|p| p.company_name.clone())
    }

    pub fn rsi(&self) -> Option<f64> {
        let state = self.controller.state();
        state.indicators().and_then(|i| i.rsi.last().copied().flatten())
    }
}

pub fn snapshot(company: &str, closes: &[f64]) -> StockSnapshot {
    StockSnapshot {
        price: Some(PriceInfo {
            company_name: Some(company.to_string()),
            current_price: closes.last().copied(),
            ..Default::default()
        }),
        historical: Some(Historical {
            timestamp: (0..closes.len()).map(|i| format!("2024-03-01 10:{:02}:00", i)).collect(),
            close: closes.iter().copied().map(Some).collect(),
            ..Default::default()
        }),
    }
}

pub fn indicators(rsi: f64) -> IndicatorSet {
    IndicatorSet { trend: Trend::Neutral, rsi: vec![Some(rsi)], ..Default::default() }
}
