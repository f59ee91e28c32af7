use derive_more::Display;

/// Simplified error system - every remote failure collapses into `NetworkFailure`.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DashboardError {
    #[display(fmt = "Network failure: {}", _0)]
    NetworkFailure(String),
    #[display(fmt = "Validation error: {}", _0)]
    ValidationError(String),
    #[display(fmt = "Config error: {}", _0)]
    ConfigError(String),
}

impl DashboardError {
    pub fn network(msg: impl Into<String>) -> Self {
        DashboardError::NetworkFailure(msg.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, DashboardError::NetworkFailure(_))
    }
}

impl std::error::Error for DashboardError {}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::NetworkFailure(format!("Malformed response: {err}"))
    }
}

// Simple convenience type aliases
pub type NetworkResult<T> = Result<T, DashboardError>;
pub type ValidationResult<T> = Result<T, DashboardError>;
