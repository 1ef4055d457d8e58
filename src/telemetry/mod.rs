//! Telemetry subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     init.rs builds the OTLP trace + metric pipelines
//!     → Telemetry handle (tracer + payment counters)
//!     → passed into the orchestrator's constructor
//!
//! per request:
//!     propagation.rs extracts the inbound trace context
//!     → orchestrator records the outcome span + one counter
//!     → propagation.rs injects context into outbound client calls
//! ```
//!
//! # Design Decisions
//! - The request path never reaches through ambient globals: the tracer and
//!   counters live in an explicitly constructed [`Telemetry`] handle
//! - Counter emission is fire-and-forget; it cannot fail a request
//! - The propagator (W3C trace-context + baggage) is the only global piece,
//!   since it defines a wire format rather than mutable state

pub mod init;
pub mod propagation;

pub use init::{init_telemetry, install_propagator, TelemetryGuard};
pub use propagation::{extract_context, inject_context};

use opentelemetry::global::BoxedTracer;
use opentelemetry::metrics::{Counter, Meter, MeterProvider as _};
use opentelemetry::trace::noop::NoopTracer;
use opentelemetry_sdk::metrics::MeterProvider as SdkMeterProvider;

/// Handle bundling the tracer and the payment outcome counters.
///
/// Constructed once at startup and shared by reference; requests only ever
/// read through it.
pub struct Telemetry {
    tracer: BoxedTracer,
    payments_initiated: Counter<u64>,
    payments_errored: Counter<u64>,
}

impl Telemetry {
    /// Build the handle from an installed tracer and a meter.
    pub fn new(tracer: BoxedTracer, meter: &Meter) -> Self {
        let payments_initiated = meter
            .u64_counter("payments_initiated")
            .with_description("Successfully initiated payments")
            .init();
        let payments_errored = meter
            .u64_counter("payments_errored")
            .with_description("Payment requests that terminated in an error")
            .init();

        Self {
            tracer,
            payments_initiated,
            payments_errored,
        }
    }

    /// Inert handle for tests: spans and counter increments go nowhere.
    pub fn disabled() -> Self {
        // A meter provider with no reader discards every measurement.
        let provider = SdkMeterProvider::builder().build();
        let meter = provider.meter("payment");
        Self::new(BoxedTracer::new(Box::new(NoopTracer::new())), &meter)
    }

    pub fn tracer(&self) -> &BoxedTracer {
        &self.tracer
    }

    pub fn payments_initiated(&self) -> &Counter<u64> {
        &self.payments_initiated
    }

    pub fn payments_errored(&self) -> &Counter<u64> {
        &self.payments_errored
    }
}
