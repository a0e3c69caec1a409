//! Request types shared with the order service

use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

/// Body of the order-service status PATCH
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Optional caller identity forwarded to the order service
///
/// Carried as `X-User-ID` / `X-Table-ID` headers for audit and authorization
/// on the backend side. The relay never interprets these values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: Option<String>,
    pub table_id: Option<String>,
}

impl ActorContext {
    pub fn new(user_id: Option<String>, table_id: Option<String>) -> Self {
        Self { user_id, table_id }
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.table_id.is_none()
    }
}
