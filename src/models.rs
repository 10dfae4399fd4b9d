use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::timeline::Timeline;

/// Campus NetID, as forwarded by the identity provider.
pub type UserId = String;
/// Catalog-assigned item identifier.
pub type ItemId = String;
/// Monotonically assigned order identifier.
pub type OrderId = u64;

/// A user's pending cart: item id -> quantity (always >= 1).
pub type Cart = BTreeMap<ItemId, u32>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub name: String,
    pub price_cents: i64,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Claimed,
    Fulfilled,
    Cancelled,
}

/// One line of an order snapshot. Name and price are copied from the catalog
/// at placement time and never change afterwards, so later catalog edits do
/// not rewrite order history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: BTreeMap<ItemId, OrderLine>,
    pub location: String,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub claimed_by: Option<UserId>,
    pub timeline: Timeline,
    pub shopper_rated: bool,
    pub deliverer_rated: bool,
}

impl Order {
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents + self.delivery_fee_cents
    }

    pub fn total_items(&self) -> u32 {
        self.items.values().map(|line| line.quantity).sum()
    }
}

/// The role a user plays for an order. A rating is always keyed by the role
/// the rated user played: a shopper rates their deliverer as `Deliverer`, a
/// deliverer rates the shopper as `Shopper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RaterRole {
    Shopper,
    Deliverer,
}

impl RaterRole {
    pub fn rated_role(self) -> RaterRole {
        match self {
            RaterRole::Shopper => RaterRole::Deliverer,
            RaterRole::Deliverer => RaterRole::Shopper,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rating {
    pub rated_user_id: UserId,
    /// Role the rated user played for the order.
    pub role: RaterRole,
    pub order_id: OrderId,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

pub fn delivery_fee_cents(subtotal_cents: i64, percent: f64) -> i64 {
    (subtotal_cents as f64 * percent).round() as i64
}
