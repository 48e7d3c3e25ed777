//! Error types for data and analysis operations.
//!
//! This module defines [`ValuationError`] which covers the failures that can
//! occur when fetching statements, talking to a provider, or storing results.

use thiserror::Error;

use crate::types::StatementKind;

/// Errors that can occur while fetching or storing financial data.
#[derive(Error, Debug)]
pub enum ValuationError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested ticker was not found.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// The provider returned no data for one of the statements.
    #[error("{statement} not available for {ticker}")]
    StatementUnavailable {
        /// The ticker that was requested.
        ticker: String,
        /// The statement that was missing.
        statement: StatementKind,
    },

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No provider is configured.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Authentication failed for a provider.
    #[error("Authentication failed for provider {0}")]
    AuthenticationFailed(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`ValuationError`].
pub type Result<T> = std::result::Result<T, ValuationError>;
