//! Rendering-agnostic description of the dashboard screen.
//!
//! Everything here is derived from [`DashboardState`] on demand; a view is
//! cheap to rebuild on every state event.

use serde::Serialize;

use crate::config::ChartConfig;
use crate::domain::chart::{ChartSpec, ColorToken, LineGeometry};
use crate::domain::market_data::{
    Direction, Historical, IndicatorSet, PriceInfo, StockSnapshot, latest,
};
use crate::domain::state::DashboardState;
use crate::log_warn;
use crate::domain::logging::LogComponent;
use crate::time_utils::sample_time_labels;

pub const TITLE: &str = "Stock Monitor";
pub const LOADING_MESSAGE: &str = "Loading stock data...";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl From<Direction> for Tone {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Tone::Positive,
            Direction::Down => Tone::Negative,
            Direction::Flat => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolChip {
    pub symbol: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCard {
    pub company_name: String,
    pub price: String,
    pub change: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub width: f64,
    pub height: f64,
    pub color: ColorToken,
    /// `None` when fewer than two closes are available
    pub geometry: Option<LineGeometry>,
    pub max_label: Option<String>,
    pub min_label: Option<String>,
    pub gridlines: Vec<f64>,
    pub time_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub label: String,
    pub value: String,
    pub tone: Option<Tone>,
}

impl IndicatorRow {
    fn plain(label: impl Into<String>, value: String) -> Self {
        Self { label: label.into(), value, tone: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewStatus {
    Loading { message: &'static str },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub symbols: Vec<SymbolChip>,
    pub status: ViewStatus,
    pub refreshing: bool,
    pub price_card: Option<PriceCard>,
    pub chart: Option<ChartView>,
    pub technical: Option<Vec<IndicatorRow>>,
    pub moving_averages: Option<Vec<IndicatorRow>>,
    pub bollinger_bands: Option<Vec<IndicatorRow>>,
}

impl DashboardView {
    /// Build the screen for a device `device_width` logical pixels wide.
    ///
    /// While loading only the header, symbol chips and the loading message are
    /// shown. Each dataset is optional on its own, so price and indicators
    /// appear independently as they arrive.
    pub fn build(
        state: &DashboardState,
        chart: &ChartConfig,
        device_width: f64,
        color: &ColorToken,
    ) -> Self {
        let symbols = state
            .symbols()
            .iter()
            .map(|s| SymbolChip { symbol: s.value().to_string(), selected: state.is_selected(s) })
            .collect();

        let mut view = Self {
            title: TITLE,
            symbols,
            status: ViewStatus::Ready,
            refreshing: state.is_refreshing(),
            price_card: None,
            chart: None,
            technical: None,
            moving_averages: None,
            bollinger_bands: None,
        };

        if state.is_loading() {
            view.status = ViewStatus::Loading { message: LOADING_MESSAGE };
            return view;
        }

        if let Some(snapshot) = state.snapshot() {
            view.price_card = price_card(snapshot);
            view.chart = chart_view(snapshot, chart, device_width, color);
        }

        if let Some(indicators) = state.indicators() {
            view.technical = Some(technical_rows(indicators));
            view.moving_averages = moving_average_rows(indicators);
            view.bollinger_bands = bollinger_rows(indicators);
        }

        view
    }
}

/// Two decimals, or `N/A` for a missing value
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn price_card(snapshot: &StockSnapshot) -> Option<PriceCard> {
    let PriceInfo { symbol, company_name, current_price, change, change_percent, .. } =
        snapshot.price.as_ref()?;

    let price = match current_price {
        Some(p) if p.is_finite() => format!("${:.2}", p),
        _ => NOT_AVAILABLE.to_string(),
    };

    let (change, tone) = match change {
        Some(c) if c.is_finite() => {
            let direction = if *c >= 0.0 { Direction::Up } else { Direction::Down };
            let percent = match change_percent {
                Some(p) if p.is_finite() => format!("{:.2}%", p.abs()),
                _ => NOT_AVAILABLE.to_string(),
            };
            (format!("{} ${:.2} ({})", direction.glyph(), c.abs(), percent), direction.into())
        }
        _ => (NOT_AVAILABLE.to_string(), Tone::Neutral),
    };

    // The service falls back to the ticker when it has no company name.
    let company_name = company_name
        .clone()
        .or_else(|| symbol.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Some(PriceCard { company_name, price, change, tone })
}

fn chart_view(
    snapshot: &StockSnapshot,
    config: &ChartConfig,
    device_width: f64,
    color: &ColorToken,
) -> Option<ChartView> {
    let historical: &Historical = snapshot.historical.as_ref()?;
    if historical.close.is_empty() {
        return None;
    }

    let width = config.chart_width(device_width);
    let height = config.height;
    let closes = historical.trailing_closes(config.window);

    let geometry = match ChartSpec::new(closes, width, height, color.clone()) {
        Ok(spec) => spec.render(),
        Err(err) => {
            log_warn!(LogComponent::Presentation("ViewModel"), "Chart skipped: {}", err);
            None
        }
    };

    Some(ChartView {
        width,
        height,
        color: color.clone(),
        max_label: geometry.as_ref().map(|g| format!("{:.2}", g.max_value)),
        min_label: geometry.as_ref().map(|g| format!("{:.2}", g.min_value)),
        geometry,
        gridlines: vec![0.0, height / 2.0, height],
        time_labels: sample_time_labels(&historical.timestamp, config.window, config.label_stride),
    })
}

fn technical_rows(indicators: &IndicatorSet) -> Vec<IndicatorRow> {
    let trend = &indicators.trend;
    let direction = trend.direction();

    let macd = indicators.macd.as_ref().and_then(|m| latest(&m.macd));
    let volume = match &indicators.volume_analysis {
        Some(v) if v.unusual_activity => format!("{} (Unusual Activity)", v.trend),
        Some(v) => v.trend.clone(),
        None => NOT_AVAILABLE.to_string(),
    };

    vec![
        IndicatorRow {
            label: "Trend".to_string(),
            value: format!("{} {}", direction.glyph(), trend.label()),
            tone: Some(direction.into()),
        },
        IndicatorRow::plain("RSI", format_value(latest(&indicators.rsi))),
        IndicatorRow::plain("MACD", format_value(macd)),
        IndicatorRow::plain("Volume", volume),
    ]
}

fn moving_average_rows(indicators: &IndicatorSet) -> Option<Vec<IndicatorRow>> {
    let averages = indicators.moving_averages.as_ref()?;
    Some(
        averages
            .iter()
            .map(|(label, series)| IndicatorRow::plain(label, format_value(latest(series))))
            .collect(),
    )
}

fn bollinger_rows(indicators: &IndicatorSet) -> Option<Vec<IndicatorRow>> {
    let bands = indicators.bollinger_bands.as_ref()?;
    Some(vec![
        IndicatorRow::plain("Upper Band", format_value(latest(&bands.upper))),
        IndicatorRow::plain("Middle Band", format_value(latest(&bands.middle))),
        IndicatorRow::plain("Lower Band", format_value(latest(&bands.lower))),
    ])
}
