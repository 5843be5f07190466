use super::client::{DeliveryError, HttpClient, SenderConfig};
use crate::batch::AddEventsRequest;
use reqwest::header::CONTENT_TYPE;
use std::time::Instant;
use tracing::debug;

/// The ingestion endpoint's verbatim answer to one delivery attempt.
///
/// Status codes are not interpreted into success or failure here; the host
/// pipeline's buffering contract owns that decision along with retry.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub status: u16,
    pub body: String,
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Serializes one batch payload and POSTs it to the ingestion endpoint.
/// Does not retry: a transport error surfaces to the caller, who re-presents
/// the same batch.
#[derive(Debug, Clone)]
pub struct Sender {
    client: HttpClient,
}

impl Sender {
    pub fn new(config: SenderConfig) -> Result<Self, DeliveryError> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    pub async fn send(&self, request: &AddEventsRequest) -> Result<DeliveryResult, DeliveryError> {
        let body = serde_json::to_vec(request)?;
        let start = Instant::now();

        debug!(
            events = request.len(),
            bytes = body.len(),
            "posting batch to {}",
            self.client.endpoint()
        );

        let response = self
            .client
            .client
            .post(self.client.endpoint().clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, latency = ?start.elapsed(), body = %body, "delivery response");

        Ok(DeliveryResult { status, body })
    }
}
