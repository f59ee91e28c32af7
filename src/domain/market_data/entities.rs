//! Payloads supplied by the analysis service. Each one is replaced wholesale
//! on every successful fetch, never merged.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::value_objects::Trend;

/// Numeric series as sent over the wire; gaps arrive as `null`
pub type Series = Vec<Option<f64>>;

/// Treat an explicit `null` like a missing key.
///
/// The service emits `null` for undefined values (and bare `NaN`, rewritten
/// to `null` before parsing), so plain `#[serde(default)]` is not enough.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Last element of a series, if present and not a gap
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Quote summary for one symbol
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Price history, column-oriented. Timestamps look like `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Historical {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub high: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub low: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub close: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: Series,
}

impl Historical {
    /// Trailing `window` closes with gaps and non-finite values dropped
    pub fn trailing_closes(&self, window: usize) -> Vec<f64> {
        let start = self.close.len().saturating_sub(window);
        self.close[start..].iter().filter_map(|v| v.filter(|v| v.is_finite())).collect()
    }
}

/// Price and history bundle for the current selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    #[serde(default)]
    pub price: Option<PriceInfo>,
    #[serde(default)]
    pub historical: Option<Historical>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Macd {
    #[serde(default, deserialize_with = "null_as_default")]
    pub macd: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signal: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub histogram: Series,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unusual_activity: bool,
    #[serde(default)]
    pub current_volume: Option<f64>,
    #[serde(default)]
    pub average_volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    #[serde(default, deserialize_with = "null_as_default")]
    pub upper: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub middle: Series,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lower: Series,
}

/// Moving averages keyed by label, in the order the service sent them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovingAverages(Vec<(String, Series)>);

impl MovingAverages {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.0.iter().map(|(label, series)| (label.as_str(), series))
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Series)> for MovingAverages {
    fn from_iter<I: IntoIterator<Item = (String, Series)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for MovingAverages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for MovingAverages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = MovingAverages;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of moving average label to series")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some((label, series)) = map.next_entry::<String, Option<Series>>()? {
                    entries.push((label, series.unwrap_or_default()));
                }
                Ok(MovingAverages(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Technical analysis values for the current selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: Trend,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rsi: Series,
    #[serde(default)]
    pub macd: Option<Macd>,
    #[serde(default)]
    pub volume_analysis: Option<VolumeAnalysis>,
    #[serde(default)]
    pub moving_averages: Option<MovingAverages>,
    #[serde(default)]
    pub bollinger_bands: Option<BollingerBands>,
    /// Set by the service when its own calculation failed
    #[serde(default)]
    pub error: Option<String>,
}
