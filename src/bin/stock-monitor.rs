//! Terminal front end: loads the symbol list, optionally switches to the
//! symbol given on the command line and prints one dashboard screen.

use std::process::ExitCode;

use clap::Parser;
use stock_monitor::config::DashboardConfig;
use stock_monitor::domain::chart::ColorToken;
use stock_monitor::domain::logging::LogComponent;
use stock_monitor::domain::market_data::Symbol;
use stock_monitor::infrastructure::StockApiClient;
use stock_monitor::presentation::view_model::{DashboardView, IndicatorRow, ViewStatus};
use stock_monitor::{SyncController, init_logging, log_error, log_info};

const COMPONENT: LogComponent = LogComponent::Presentation("Cli");

#[derive(Parser)]
#[command(name = "stock-monitor")]
#[command(about = "Print the stock dashboard for one symbol", long_about = None)]
struct Cli {
    /// Symbol to show instead of the first one listed by the service
    symbol: Option<String>,
    /// Device width in logical pixels; the chart uses this minus the inset
    #[arg(long, default_value_t = 390.0)]
    width: f64,
    /// Run a pull-to-refresh before printing
    #[arg(long)]
    refresh: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.log_level);

    log_info!(COMPONENT, "Using analysis service at {}", config.api_url);
    let controller =
        SyncController::new(StockApiClient::new(config.api_url.clone()), config.response_policy);

    controller.load_symbols().await;

    if let Some(raw) = cli.symbol {
        match Symbol::new(raw) {
            Ok(symbol) => controller.select_symbol(symbol).await,
            Err(err) => {
                log_error!(COMPONENT, "{}", err);
                return ExitCode::from(2);
            }
        }
    }

    if cli.refresh {
        controller.refresh().await;
    }

    let view = DashboardView::build(
        &controller.state(),
        &config.chart,
        cli.width,
        &ColorToken::default(),
    );
    print!("{}", render_text(&view));
    ExitCode::SUCCESS
}

fn render_text(view: &DashboardView) -> String {
    let mut out = format!("{}\n", view.title);

    let chips: Vec<String> = view
        .symbols
        .iter()
        .map(|chip| if chip.selected { format!("[{}]", chip.symbol) } else { chip.symbol.clone() })
        .collect();
    out.push_str(&format!("{}\n\n", chips.join("  ")));

    if let ViewStatus::Loading { message } = &view.status {
        out.push_str(message);
        out.push('\n');
        return out;
    }

    if let Some(card) = &view.price_card {
        out.push_str(&format!("{}\n{}  {}\n\n", card.company_name, card.price, card.change));
    }

    if let Some(chart) = &view.chart {
        out.push_str(&format!("Price Chart ({:.0}x{:.0})\n", chart.width, chart.height));
        match &chart.geometry {
            Some(geometry) => out.push_str(&format!(
                "  {} points, {} segments, range {} .. {}\n",
                geometry.points.len(),
                geometry.segments.len(),
                chart.min_label.as_deref().unwrap_or("-"),
                chart.max_label.as_deref().unwrap_or("-"),
            )),
            None => out.push_str("  not enough data\n"),
        }
        out.push_str(&format!("  {}\n\n", chart.time_labels.join("  ")));
    }

    push_rows(&mut out, "Technical Indicators", view.technical.as_deref());
    push_rows(&mut out, "Moving Averages", view.moving_averages.as_deref());
    push_rows(&mut out, "Bollinger Bands", view.bollinger_bands.as_deref());
    out
}

fn push_rows(out: &mut String, heading: &str, rows: Option<&[IndicatorRow]>) {
    let Some(rows) = rows else { return };
    out.push_str(heading);
    out.push('\n');
    for row in rows {
        out.push_str(&format!("  {:<14}{}\n", row.label, row.value));
    }
    out.push('\n');
}
