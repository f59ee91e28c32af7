pub mod view_model;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use view_model::DashboardView;
