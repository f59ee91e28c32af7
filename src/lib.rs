//! Stock dashboard core: a dependency-free line chart geometry engine and
//! the controller that keeps symbol selection, price history and technical
//! indicators in sync with the remote analysis service.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

pub use application::SyncController;
pub use config::{ChartConfig, DashboardConfig, ResponsePolicy};
pub use domain::chart::{ChartSpec, ColorToken, LineGeometry, Point, Segment, render};
pub use domain::state::{DashboardState, FetchState};

use domain::logging::{LogComponent, LogLevel};

/// Install the console logger and wall clock. Later calls keep the first setup.
pub fn init_logging(min_level: LogLevel) {
    let installed = domain::logging::install_logger(Box::new(infrastructure::ConsoleLogger::new(
        min_level,
    )));
    domain::logging::install_clock(Box::new(infrastructure::SystemClock));
    if installed {
        log_debug!(LogComponent::Presentation("Initialize"), "Logging at {:?} and above", min_level);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    init_logging(LogLevel::Debug);
    log_info!(LogComponent::Presentation("Initialize"), "🚀 Stock monitor initialized");
}
