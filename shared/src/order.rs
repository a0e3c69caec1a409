//! Kitchen order DTOs
//!
//! `OrderSnapshot` is an immutable point-in-time view of one active order as
//! returned by the order service. The order service is the source of truth;
//! snapshots are never mutated in place, a status change always produces a
//! fresh snapshot from the backend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status as seen through the relay
///
/// The relay does not enforce transition legality — the order service does.
/// Statuses introduced by the backend that this build does not know about are
/// carried opaquely and serialized back out byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Preparing,
    Ready,
    /// Backend-defined status this build does not interpret
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CREATED" => OrderStatus::Created,
            "PREPARING" => OrderStatus::Preparing,
            "READY" => OrderStatus::Ready,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    /// Menu item reference
    pub item_id: i64,
    pub item_name: String,
    pub quantity: u32,
    /// Price per unit in currency unit
    pub unit_price: Decimal,
}

/// Immutable view of one active order, as displayed in the kitchen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: i64,
    pub table_id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    /// Total amount in currency unit
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_known_values_round_trip() {
        for raw in ["CREATED", "PREPARING", "READY"] {
            let status: OrderStatus = serde_json::from_value(raw.into()).unwrap();
            assert_eq!(serde_json::to_value(&status).unwrap(), raw);
        }
        assert_eq!(
            OrderStatus::from("READY".to_string()),
            OrderStatus::Ready
        );
    }

    #[test]
    fn test_status_unknown_value_is_opaque() {
        let status = OrderStatus::from("DELIVERED".to_string());
        assert_eq!(status, OrderStatus::Other("DELIVERED".to_string()));
        // Must serialize back to the exact backend string
        assert_eq!(serde_json::to_value(&status).unwrap(), "DELIVERED");
    }

    #[test]
    fn test_snapshot_deserializes_backend_shape() {
        let json = serde_json::json!({
            "id": 42,
            "tableId": 7,
            "userId": 3,
            "status": "PREPARING",
            "totalAmount": 25.5,
            "createdAt": "2026-08-01T12:00:00Z",
            "items": [
                { "id": 1, "itemId": 11, "itemName": "Ramen", "quantity": 2, "unitPrice": 12.75 }
            ]
        });

        let snapshot: OrderSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.id, 42);
        assert_eq!(snapshot.status, OrderStatus::Preparing);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].item_name, "Ramen");
    }
}
