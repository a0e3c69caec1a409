//! OrderServiceClient — HTTP client for the order service

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use shared::{ActorContext, OrderSnapshot, OrderStatus, UpdateStatusRequest};

use super::{OrderBackend, UpstreamError};

/// Header carrying the acting user's identity to the backend
pub const USER_ID_HEADER: &str = "X-User-ID";
/// Header carrying the table identity to the backend
pub const TABLE_ID_HEADER: &str = "X-Table-ID";

/// HTTP client for the order service REST API
///
/// The `base_url` points at the order collection (e.g.
/// `http://gateway:8080/api/orders`); the client appends `/active` and
/// `/{id}/status` to it.
pub struct OrderServiceClient {
    client: Client,
    base_url: String,
}

impl OrderServiceClient {
    /// Create a new client with a bounded request timeout
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Classify a non-success response
    ///
    /// 4xx means the backend looked at the request and said no; anything
    /// else on the error side means it could not serve us at all.
    async fn reject_or_unavailable(response: reqwest::Response) -> UpstreamError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_client_error() {
            UpstreamError::Rejected {
                status: status.as_u16(),
                body,
            }
        } else {
            UpstreamError::Unavailable(format!("status {status}: {body}"))
        }
    }
}

#[async_trait]
impl OrderBackend for OrderServiceClient {
    async fn fetch_active(&self) -> Result<Vec<OrderSnapshot>, UpstreamError> {
        let url = format!("{}/active", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::reject_or_unavailable(response).await);
        }

        let orders: Vec<OrderSnapshot> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Protocol(format!("failed to parse active orders: {e}")))?;

        Ok(orders)
    }

    async fn patch_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        actor: &ActorContext,
    ) -> Result<OrderSnapshot, UpstreamError> {
        let url = format!("{}/{}/status", self.base_url, order_id);

        let mut request = self
            .client
            .patch(&url)
            .json(&UpdateStatusRequest { status });

        if let Some(user_id) = &actor.user_id {
            request = request.header(USER_ID_HEADER, user_id);
        }
        if let Some(table_id) = &actor.table_id {
            request = request.header(TABLE_ID_HEADER, table_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::reject_or_unavailable(response).await);
        }

        let snapshot: OrderSnapshot = response
            .json()
            .await
            .map_err(|e| UpstreamError::Protocol(format!("failed to parse order snapshot: {e}")))?;

        Ok(snapshot)
    }
}
