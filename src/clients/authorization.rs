//! Payment authorization client.

use opentelemetry::Context;
use reqwest::header::HeaderMap;
use url::Url;

use crate::clients::types::{ClientError, ClientResult};
use crate::telemetry::inject_context;

/// Typed client for the payment authorization service.
#[derive(Clone)]
pub struct AuthorizationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthorizationClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Ask the authorization service to clear a payment.
    ///
    /// Only the response status code carries information: `200` means
    /// authorized, any other received status means denied. A transport
    /// failure is the only error case.
    pub async fn authorize(
        &self,
        cx: &Context,
        payment_token: &str,
        amount: f64,
    ) -> ClientResult<bool> {
        let mut url = self.base_url.clone();
        url.set_path("/authorize");
        url.query_pairs_mut()
            .append_pair("payment_token", payment_token)
            .append_pair("amount", &amount.to_string());

        let mut headers = HeaderMap::new();
        inject_context(cx, &mut headers);

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Ok(response.status() == http::StatusCode::OK)
    }
}
