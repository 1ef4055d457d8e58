//! Shared downstream contracts and error definitions.

use serde::Deserialize;
use thiserror::Error;

/// Product record returned by the catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Errors that can occur talking to a downstream service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established, timed out, or was aborted.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a status outside the success class.
    #[error("unexpected status {0}")]
    Status(http::StatusCode),

    /// The response body was not decodable into the expected contract.
    #[error("undecodable response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The response decoded but violated the contract.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Result type for downstream calls.
pub type ClientResult<T> = Result<T, ClientError>;
