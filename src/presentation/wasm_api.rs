use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::application::SyncController;
use crate::config::DashboardConfig;
use crate::domain::chart::ColorToken;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Symbol;
use crate::infrastructure::StockApiClient;
use crate::log_error;
use crate::presentation::view_model::DashboardView;

/// JS-facing handle on the dashboard.
///
/// Operations return immediately and run on the browser event loop; the page
/// re-reads `viewJson` when the callback passed to `onChange` fires.
#[wasm_bindgen]
pub struct StockDashboard {
    controller: SyncController<StockApiClient>,
    config: DashboardConfig,
}

#[wasm_bindgen]
impl StockDashboard {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<StockDashboard, JsValue> {
        let config = match config_json {
            Some(json) => DashboardConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => DashboardConfig::default(),
        };
        let client = StockApiClient::new(config.api_url.clone());
        Ok(Self { controller: SyncController::new(client, config.response_policy), config })
    }

    /// Invoke `callback` with the event name after every state change
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.controller.events().subscribe(move |event| {
            use crate::domain::events::DomainEvent;
            let name = JsValue::from_str(event.event_type());
            if let Err(e) = callback.call1(&JsValue::NULL, &name) {
                log_error!(
                    LogComponent::Presentation("StockDashboard"),
                    "onChange callback failed: {:?}",
                    e
                );
            }
        });
    }

    pub fn start(&self) {
        let controller = self.controller.clone();
        spawn_local(async move { controller.load_symbols().await });
    }

    pub fn select(&self, symbol: String) -> Result<(), JsValue> {
        let symbol = Symbol::new(symbol).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let controller = self.controller.clone();
        spawn_local(async move { controller.select_symbol(symbol).await });
        Ok(())
    }

    pub fn refresh(&self) {
        let controller = self.controller.clone();
        spawn_local(async move { controller.refresh().await });
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self, device_width: f64) -> Result<String, JsValue> {
        let view = DashboardView::build(
            &self.controller.state(),
            &self.config.chart,
            device_width,
            &ColorToken::default(),
        );
        serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
