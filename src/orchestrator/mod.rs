//! Payment orchestration core.
//!
//! # Data Flow
//! ```text
//! raw body + inbound trace context
//!     → decode & validate PaymentRequest
//!     → ProductClient.fetch(product_id)
//!     → AuthorizationClient.authorize(payment_token, price)
//!     → terminal outcome
//!         → one outcome span (status ok | error, baggage stripped)
//!         → one counter increment (payments_initiated | payments_errored)
//! ```
//!
//! # Design Decisions
//! - Downstream calls run strictly sequentially; the authorization call is
//!   never started unless the product lookup succeeded
//! - No retries, no internal timeouts: a failed call is terminal and the
//!   response deadline belongs to the HTTP layer
//! - The telemetry handle is injected at construction; the request path
//!   holds no ambient global state

pub mod types;

pub use types::{PaymentError, PaymentRequest};

use opentelemetry::baggage::BaggageExt;
use opentelemetry::trace::{Span, Status, Tracer};
use opentelemetry::Context;
use tracing::debug;

use crate::clients::{AuthorizationClient, ProductClient};
use crate::telemetry::Telemetry;

/// Name of the span recording the orchestration outcome.
const OUTCOME_SPAN: &str = "process_payment";

/// Drives one payment request from raw body to terminal outcome.
pub struct PaymentOrchestrator {
    products: ProductClient,
    authorizations: AuthorizationClient,
    telemetry: Telemetry,
}

impl PaymentOrchestrator {
    pub fn new(
        products: ProductClient,
        authorizations: AuthorizationClient,
        telemetry: Telemetry,
    ) -> Self {
        Self {
            products,
            authorizations,
            telemetry,
        }
    }

    /// Run one payment request to its terminal outcome.
    ///
    /// Exactly one outcome span and exactly one counter increment are
    /// recorded per call, whichever branch terminates it.
    pub async fn process(&self, cx: &Context, body: &[u8]) -> Result<(), PaymentError> {
        let outcome = self.run(cx, body).await;
        self.record_outcome(cx, &outcome);
        outcome
    }

    async fn run(&self, cx: &Context, body: &[u8]) -> Result<(), PaymentError> {
        let request = PaymentRequest::from_json(body)?;

        let product = self
            .products
            .fetch(cx, &request.product_id)
            .await
            .map_err(PaymentError::ProductFetch)?;
        debug!(product_id = %product.id, price = product.price, "product resolved");

        let authorized = self
            .authorizations
            .authorize(cx, &request.payment_token, product.price)
            .await
            .map_err(PaymentError::AuthorizationFailed)?;

        if !authorized {
            return Err(PaymentError::Denied);
        }

        Ok(())
    }

    /// Record the outcome span and bump exactly one counter.
    ///
    /// Telemetry here is fire-and-forget: nothing on this path can change
    /// the response.
    fn record_outcome(&self, cx: &Context, outcome: &Result<(), PaymentError>) {
        // The outcome span must not inherit caller-supplied baggage.
        let cx = Self::outcome_context(cx);

        let mut span = self
            .telemetry
            .tracer()
            .start_with_context(OUTCOME_SPAN, &cx);
        match outcome {
            Ok(()) => span.set_status(Status::Ok),
            Err(err) => span.set_status(Status::error(err.to_string())),
        }
        span.end();

        match outcome {
            Ok(()) => self.telemetry.payments_initiated().add(1, &[]),
            Err(_) => self.telemetry.payments_errored().add(1, &[]),
        }
    }

    /// Context the outcome span is parented on: same trace, no baggage.
    fn outcome_context(cx: &Context) -> Context {
        cx.with_cleared_baggage()
    }
}
