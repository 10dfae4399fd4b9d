use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ItemId, Order, OrderId, OrderStatus, UserId};
use crate::timeline::ChecklistStep;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub delivery_location: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemDto {
    pub item_id: ItemId,
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimelineStepDto {
    pub step: ChecklistStep,
    pub done: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDto {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub location: String,
    pub items: Vec<OrderItemDto>,
    pub total_items: u32,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
    pub claimed_by: Option<UserId>,
    pub timeline: Vec<TimelineStepDto>,
    pub shopper_rated: bool,
    pub deliverer_rated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        let items = order
            .items
            .iter()
            .map(|(item_id, line)| OrderItemDto {
                item_id: item_id.clone(),
                name: line.name.clone(),
                price_cents: line.price_cents,
                quantity: line.quantity,
            })
            .collect();
        let timeline = order
            .timeline
            .entries()
            .map(|(step, done)| TimelineStepDto { step, done })
            .collect();
        Self {
            id: order.id,
            user_id: order.user_id.clone(),
            status: order.status,
            location: order.location.clone(),
            items,
            total_items: order.total_items(),
            subtotal_cents: order.subtotal_cents,
            delivery_fee_cents: order.delivery_fee_cents,
            total_cents: order.total_cents(),
            claimed_by: order.claimed_by.clone(),
            timeline,
            shopper_rated: order.shopper_rated,
            deliverer_rated: order.deliverer_rated,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderDto>,
}
