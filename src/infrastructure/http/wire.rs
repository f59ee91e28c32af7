//! Response envelopes of the analysis service and lenient body decoding.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::errors::NetworkResult;
use crate::domain::market_data::entities::null_as_default;
use crate::domain::market_data::{IndicatorSet, StockSnapshot};

/// `GET /api/stocks`
#[derive(Debug, Deserialize)]
pub struct StocksResponse {
    #[serde(default)]
    pub stocks: Vec<String>,
}

/// `GET /api/stock/{symbol}`
#[derive(Debug, Deserialize)]
pub struct StockResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    pub data: StockSnapshot,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cached: bool,
}

/// `GET /api/analysis/{symbol}`
#[derive(Debug, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    pub indicators: IndicatorSet,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cached: bool,
}

/// Decode a response body, tolerating the bare `NaN` / `Infinity` tokens the
/// service emits for undefined indicator values.
pub fn decode<T: DeserializeOwned>(body: &str) -> NetworkResult<T> {
    Ok(serde_json::from_str(&sanitize_non_finite(body))?)
}

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Replace bare non-finite number tokens outside string literals with `null`.
pub fn sanitize_non_finite(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_bare_tokens_only() {
        let body = r#"{"rsi":[NaN,-Infinity,Infinity,51.2],"trend":"NaN \"NaN\""}"#;
        assert_eq!(
            sanitize_non_finite(body),
            r#"{"rsi":[null,null,null,51.2],"trend":"NaN \"NaN\""}"#
        );
    }

    #[test]
    fn decodes_analysis_with_gaps() {
        let body = r#"{"symbol":"AAPL","cached":true,"indicators":{
            "trend":"uptrend","rsi":[NaN,55.5],
            "macd":{"macd":[NaN,0.42],"signal":[null,0.3],"histogram":[null,0.12]},
            "moving_averages":{"SMA_5":[NaN,190.1]},
            "bollinger_bands":{"upper":[NaN,195.0],"middle":[NaN,190.0],"lower":[NaN,185.0]},
            "volume_analysis":{"trend":"stable","unusual_activity":false,
                               "current_volume":900,"average_volume":1000}}}"#;
        let response: AnalysisResponse = decode(body).unwrap();
        assert!(response.cached);
        assert_eq!(response.indicators.rsi, vec![None, Some(55.5)]);
        assert_eq!(response.indicators.bollinger_bands.unwrap().lower, vec![None, Some(185.0)]);
    }

    #[test]
    fn price_with_undefined_values_still_decodes() {
        let body = r#"{"symbol":"AAPL","cached":null,"data":{
            "price":{"symbol":"AAPL","companyName":null,"currentPrice":190.0,
                     "change":NaN,"changePercent":NaN,"marketCap":null,"peRatio":NaN},
            "historical":{"timestamp":["2024-05-01 10:00:00"],"close":[190.0]}}}"#;
        let response: StockResponse = decode(body).unwrap();
        let price = response.data.price.unwrap();
        assert_eq!(price.company_name, None);
        assert_eq!(price.current_price, Some(190.0));
        assert_eq!(price.change, None);
        assert_eq!(price.change_percent, None);
        assert!(!response.cached);
        assert_eq!(response.data.historical.unwrap().close, vec![Some(190.0)]);
    }

    #[test]
    fn error_payload_is_a_network_failure() {
        let err = decode::<StockResponse>(r#"{"error":"Failed to fetch data for ZZZZ"}"#).unwrap_err();
        assert!(err.is_network());
    }
}
