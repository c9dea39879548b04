//! Error types for the refresh engine.

use thiserror::Error;

/// Failure of a single acquisition call.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request never produced a response.
    #[error("transport failure at {endpoint}: {message}")]
    Transport {
        /// Endpoint that was called.
        endpoint: String,
        /// Underlying failure.
        message: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status {
        /// Endpoint that was called.
        endpoint: String,
        /// Status code.
        status: u16,
    },

    /// The endpoint answered successfully but reported an application error.
    #[error("{endpoint} reported an error: {message}")]
    Response {
        /// Endpoint that was called.
        endpoint: String,
        /// Error message from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A fallback chain with no candidates.
    #[error("no candidate sources configured")]
    NoCandidates,

    /// Every candidate failed.
    #[error("all {attempts} candidates failed; last error: {last}")]
    AllCandidatesFailed {
        /// Number of candidates tried.
        attempts: usize,
        /// Error from the final candidate.
        last: Box<SourceError>,
    },
}

impl SourceError {
    /// Creates a transport error.
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a status error.
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Creates an application-level response error.
    pub fn response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Response {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

impl From<loanscope_core::CoreError> for SourceError {
    fn from(err: loanscope_core::CoreError) -> Self {
        SourceError::Decode(err.to_string())
    }
}

/// Result type for acquisition calls.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors surfaced by a wallet refresh.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The wallet address is empty.
    #[error("invalid wallet address: {0:?}")]
    InvalidWallet(String),

    /// Another refresh is still running.
    #[error("a refresh is already in progress")]
    RefreshInProgress,

    /// Reserve data for one market could not be fetched.
    #[error("failed to fetch reserves for market {market}: {source}")]
    Reserves {
        /// Market identifier.
        market: String,
        /// Underlying failure.
        #[source]
        source: SourceError,
    },

    /// Price data could not be fetched.
    #[error("failed to fetch prices: {0}")]
    Prices(#[source] SourceError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
