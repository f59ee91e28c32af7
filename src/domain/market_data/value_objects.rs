use std::fmt;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::domain::errors::{DashboardError, ValidationResult};

/// Value Object - ticker symbol exactly as the service lists it.
///
/// Only surrounding whitespace is stripped; the service keys its data by the
/// literal string, so case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> ValidationResult<Self> {
        let symbol = symbol.into();
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::ValidationError("Symbol cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = DashboardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Overall direction reported by the analysis service.
///
/// Strings outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(from = "String", into = "String")]
pub enum Trend {
    StrongUptrend,
    Uptrend,
    ModeratelyBullish,
    Neutral,
    ModeratelyBearish,
    Downtrend,
    StrongDowntrend,
    #[default]
    Unknown,
    #[strum(disabled)]
    Other(String),
}

impl Trend {
    /// Wire name: the snake_case tag, or the raw string for `Other`
    pub fn as_str(&self) -> &str {
        match self {
            Trend::Other(raw) => raw,
            known => known.as_ref(),
        }
    }
}

impl From<String> for Trend {
    fn from(raw: String) -> Self {
        raw.parse().unwrap_or(Trend::Other(raw))
    }
}

impl From<Trend> for String {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Other(raw) => raw,
            known => known.as_ref().to_string(),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse direction used for colouring and the arrow glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Flat => "■",
        }
    }
}

impl Trend {
    /// Only the plain and strong trends count as directional.
    pub fn direction(&self) -> Direction {
        match self {
            Trend::StrongUptrend | Trend::Uptrend => Direction::Up,
            Trend::StrongDowntrend | Trend::Downtrend => Direction::Down,
            _ => Direction::Flat,
        }
    }

    /// Wire name with the first underscore turned into a space
    pub fn label(&self) -> String {
        self.as_str().replacen('_', " ", 1)
    }
}
