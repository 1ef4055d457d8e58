//! Telemetry pipeline initialization.
//!
//! Builds the OTLP trace and metric export pipelines, installs the W3C
//! composite propagator, and wires the tracing subscriber so log events and
//! spans share one stream.

use std::env;
use std::time::Duration;

use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::MeterProvider as SdkMeterProvider;
use opentelemetry_sdk::propagation::{
    BaggagePropagator, TextMapCompositePropagator, TraceContextPropagator,
};
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;
use crate::telemetry::Telemetry;

/// Keeps the exporter pipelines alive until process shutdown.
pub struct TelemetryGuard {
    meter_provider: SdkMeterProvider,
}

impl TelemetryGuard {
    /// Flush and tear down both pipelines.
    pub fn shutdown(self) {
        global::shutdown_tracer_provider();
        if let Err(e) = self.meter_provider.shutdown() {
            tracing::warn!(error = %e, "meter provider shutdown failed");
        }
    }
}

/// Install the W3C trace-context + baggage composite propagator.
///
/// Separate from [`init_telemetry`] so tests can exercise header
/// propagation without an export pipeline.
pub fn install_propagator() {
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]));
}

/// Initialize the full telemetry stack.
///
/// Returns the [`Telemetry`] handle the orchestrator is constructed with and
/// a guard that must outlive the server.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<(Telemetry, TelemetryGuard)> {
    let otlp_endpoint =
        env::var("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_else(|_| config.otlp_endpoint.clone());

    install_propagator();

    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ]);

    // Sampled-down tracing in production, everything elsewhere.
    let sampler = if config.environment == "production" {
        sdktrace::Sampler::ParentBased(Box::new(sdktrace::Sampler::TraceIdRatioBased(
            config.sample_ratio,
        )))
    } else {
        sdktrace::Sampler::AlwaysOn
    };

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(&otlp_endpoint),
        )
        .with_trace_config(
            sdktrace::Config::default()
                .with_sampler(sampler)
                .with_id_generator(sdktrace::RandomIdGenerator::default())
                .with_resource(resource.clone()),
        )
        .install_batch(runtime::Tokio)?;

    let meter_provider = opentelemetry_otlp::new_pipeline()
        .metrics(runtime::Tokio)
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(&otlp_endpoint),
        )
        .with_resource(resource)
        .with_period(Duration::from_secs(config.metrics_interval_secs))
        .build()?;

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer.clone());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry_layer)
        .init();

    let meter = meter_provider.meter("payment");
    let telemetry = Telemetry::new(BoxedTracer::new(Box::new(tracer)), &meter);

    tracing::info!(
        service = %config.service_name,
        otlp_endpoint = %otlp_endpoint,
        "telemetry pipeline initialized"
    );

    Ok((
        telemetry,
        TelemetryGuard { meter_provider },
    ))
}
