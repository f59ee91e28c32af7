pub mod http;
pub mod services;

pub use http::StockApiClient;
pub use services::{ConsoleLogger, SystemClock};
