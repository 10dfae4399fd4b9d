use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ItemId;

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub item_id: ItemId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// Signed change applied to the current quantity. A result of zero or
    /// less removes the line.
    pub delta: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineDto {
    pub item_id: ItemId,
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
    pub line_total_cents: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineDto>,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}
