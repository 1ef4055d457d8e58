//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! orchestrator. All types derive Serde traits for deserialization from
//! config files, and every section has defaults so the service can start
//! with no config file at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the payment orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Downstream service endpoints.
    pub upstreams: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Telemetry pipeline settings.
    pub telemetry: TelemetryConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Downstream service endpoints consumed by the orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the product catalog service.
    pub product_service_url: String,

    /// Base URL of the payment authorization service.
    pub authorization_service_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            product_service_url: "http://127.0.0.1:3333".to_string(),
            authorization_service_url: "http://127.0.0.1:8081".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for outbound calls, in seconds.
    pub connect_secs: u64,

    /// Inbound request deadline (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Telemetry pipeline settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name reported in trace/metric resource attributes.
    pub service_name: String,

    /// Deployment environment (production, development, ...).
    pub environment: String,

    /// OTLP collector endpoint. `OTEL_EXPORTER_OTLP_ENDPOINT` wins over this.
    pub otlp_endpoint: String,

    /// Trace sampling ratio used in production (0.0 to 1.0).
    pub sample_ratio: f64,

    /// Metric export interval in seconds.
    pub metrics_interval_secs: u64,

    /// Fallback log filter when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "payment-orchestrator".to_string(),
            environment: "development".to_string(),
            otlp_endpoint: "http://localhost:4317".to_string(),
            sample_ratio: 0.1,
            metrics_interval_secs: 15,
            log_level: "info,payment_orchestrator=debug".to_string(),
        }
    }
}
