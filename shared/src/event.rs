//! Downstream event DTOs
//!
//! `ReadyEvent` is the projection published to the event channel when the
//! order service confirms a READY transition. It carries only what a pickup
//! display needs: order identity, table identity, item names and quantities.
//! Prices and line-item identities are deliberately dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::order::OrderSnapshot;

/// Reduced line item carried by a [`ReadyEvent`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEventItem {
    pub item_name: String,
    pub quantity: u32,
}

/// Event published when an order is confirmed READY
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEvent {
    pub order_id: i64,
    pub table_id: i64,
    pub items: Vec<ReadyEventItem>,
    /// When the READY transition was confirmed by this relay, not the
    /// backend's own timestamp
    pub ready_at: DateTime<Utc>,
}

impl ReadyEvent {
    /// Project a backend-confirmed snapshot into a ready event
    ///
    /// Callers must only pass snapshots the order service has already
    /// accepted as READY; this type never represents a speculative state.
    pub fn from_snapshot(snapshot: &OrderSnapshot, ready_at: DateTime<Utc>) -> Self {
        Self {
            order_id: snapshot.id,
            table_id: snapshot.table_id,
            items: snapshot
                .items
                .iter()
                .map(|item| ReadyEventItem {
                    item_name: item.item_name.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            ready_at,
        }
    }
}
