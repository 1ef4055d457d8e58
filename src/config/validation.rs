//! Configuration validation.
//!
//! Serde handles syntactic validation; this pass checks semantics: the bind
//! address parses, upstream URLs are well-formed http(s) endpoints, and
//! numeric ranges make sense. All violations are returned, not just the
//! first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic violation found in a [`ServiceConfig`].
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("upstreams.{field} {value:?} is not a valid http(s) URL")]
    UpstreamUrl { field: &'static str, value: String },

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("telemetry.sample_ratio {0} must be within 0.0..=1.0")]
    SampleRatio(f64),

    #[error("telemetry.metrics_interval_secs must be greater than zero")]
    ZeroMetricsInterval,

    #[error("telemetry.service_name must not be empty")]
    EmptyServiceName,
}

/// Validate a configuration, returning every violation found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_upstream_url(
        "product_service_url",
        &config.upstreams.product_service_url,
        &mut errors,
    );
    check_upstream_url(
        "authorization_service_url",
        &config.upstreams.authorization_service_url,
        &mut errors,
    );

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if !(0.0..=1.0).contains(&config.telemetry.sample_ratio) {
        errors.push(ValidationError::SampleRatio(config.telemetry.sample_ratio));
    }
    if config.telemetry.metrics_interval_secs == 0 {
        errors.push(ValidationError::ZeroMetricsInterval);
    }
    if config.telemetry.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::UpstreamUrl {
            field,
            value: value.to_string(),
        }),
    }
}
