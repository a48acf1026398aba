//! `POST /createOrder` client.

use std::time::Duration;

use async_trait::async_trait;
use rbar_core::{OrderEndpoint, SubmitError};
use rbar_schemas::{OrderPayload, OrderReceipt, OrderRejection};
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::{describe_transport, join_url};

/// Order-creation service over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpOrderEndpoint {
    http: reqwest::Client,
    order_url: String,
}

impl HttpOrderEndpoint {
    pub fn new(base_url: &str, order_path: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            order_url: join_url(base_url, order_path),
        })
    }

    pub fn order_url(&self) -> &str {
        &self.order_url
    }
}

#[async_trait]
impl OrderEndpoint for HttpOrderEndpoint {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmitError> {
        let resp = self
            .http
            .post(&self.order_url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(describe_transport(&e)))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| SubmitError::Transport(describe_transport(&e)))?;
        debug!(url = %self.order_url, status = status.as_u16(), bytes = body.len(), "createOrder response");

        if status.is_success() {
            // The service has answered with and without a body over time.
            return Ok(serde_json::from_slice::<OrderReceipt>(&body).unwrap_or_default());
        }

        let reason = serde_json::from_slice::<OrderRejection>(&body)
            .map(|r| r.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}
