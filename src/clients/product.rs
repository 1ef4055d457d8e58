//! Product catalog client.

use opentelemetry::Context;
use reqwest::header::HeaderMap;
use url::Url;

use crate::clients::types::{ClientError, ClientResult, ProductInfo};
use crate::telemetry::inject_context;

/// Typed client for the product catalog service.
///
/// One outbound `GET` per call; the caller's trace context travels in the
/// request headers so the catalog can continue the same trace.
#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Look up one product by id.
    ///
    /// All-or-nothing: any transport, status or decode failure yields an
    /// error and no partial result.
    pub async fn fetch(&self, cx: &Context, product_id: &str) -> ClientResult<ProductInfo> {
        let mut url = self.base_url.clone();
        url.set_path("/get_product");
        url.query_pairs_mut().append_pair("product_id", product_id);

        let mut headers = HeaderMap::new();
        inject_context(cx, &mut headers);

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await.map_err(ClientError::Transport)?;
        let product: ProductInfo = serde_json::from_slice(&body).map_err(ClientError::Decode)?;
        if product.price < 0.0 {
            return Err(ClientError::InvalidPayload(format!(
                "product {} has negative price {}",
                product.id, product.price
            )));
        }

        Ok(product)
    }
}
