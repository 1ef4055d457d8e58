//! Request contracts and the request-level error taxonomy.

use serde::Deserialize;
use thiserror::Error;

use crate::clients::ClientError;

/// Inbound payment request body.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub product_id: String,
    pub payment_token: String,
}

impl PaymentRequest {
    /// Decode and validate an inbound request body.
    pub fn from_json(body: &[u8]) -> Result<Self, PaymentError> {
        let request: PaymentRequest =
            serde_json::from_slice(body).map_err(|e| PaymentError::InvalidRequest(e.to_string()))?;

        if request.product_id.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "product_id must not be empty".into(),
            ));
        }
        if request.payment_token.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "payment_token must not be empty".into(),
            ));
        }

        Ok(request)
    }
}

/// Terminal outcomes of a payment request.
///
/// Every variant ends the request; nothing is retried or recovered
/// internally. The HTTP layer owns the status-code mapping.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Malformed or incomplete request body.
    #[error("{0}")]
    InvalidRequest(String),

    /// Product lookup failed: unreachable, error status, or undecodable.
    #[error("Could not fetch product")]
    ProductFetch(#[source] ClientError),

    /// Authorization service could not be reached.
    #[error("Could not authorize payment")]
    AuthorizationFailed(#[source] ClientError),

    /// Authorization service answered, and the answer was no.
    #[error("Payment not authorized")]
    Denied,
}
