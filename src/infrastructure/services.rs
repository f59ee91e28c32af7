use crate::domain::logging::{Clock, LogEntry, LogLevel, Logger};

/// Console logger: browser console on wasm32, stderr elsewhere
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// `[HH:MM:SS.mmm] LEVEL COMPONENT | message`
    pub fn format_log_entry(&self, entry: &LogEntry) -> String {
        format!(
            "[{}] {} {} | {}",
            format_clock(entry.timestamp_ms),
            entry.level,
            entry.component,
            entry.message
        )
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self, _level: LogLevel, line: &str) {
        eprintln!("{}", line);
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self, level: LogLevel, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        self.emit(entry.level, &self.format_log_entry(&entry));
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// `HH:MM:SS.mmm` (UTC) for a millisecond epoch timestamp
pub fn format_clock(timestamp_ms: u64) -> String {
    let millis = timestamp_ms % 1000;
    let seconds = (timestamp_ms / 1000) % 60;
    let minutes = (timestamp_ms / 60_000) % 60;
    let hours = (timestamp_ms / 3_600_000) % 24;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Wall clock in epoch milliseconds
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}
