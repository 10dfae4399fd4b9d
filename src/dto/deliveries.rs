use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::orders::{OrderDto, TimelineStepDto};
use crate::models::{Order, OrderId, OrderStatus};
use crate::timeline::ChecklistStep;

/// An order as seen from the deliverer side: the earnings figure is the
/// delivery fee the deliverer keeps.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryDto {
    #[serde(flatten)]
    pub order: OrderDto,
    pub earnings_cents: i64,
}

impl From<&Order> for DeliveryDto {
    fn from(order: &Order) -> Self {
        Self {
            earnings_cents: order.delivery_fee_cents,
            order: OrderDto::from(order),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryBoard {
    pub available: Vec<DeliveryDto>,
    pub mine: Vec<DeliveryDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStepRequest {
    pub step: ChecklistStep,
    pub checked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistUpdated {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub timeline: Vec<TimelineStepDto>,
}
