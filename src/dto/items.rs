use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CatalogItem, ItemId};

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemDto {
    pub id: ItemId,
    pub name: String,
    pub price_cents: i64,
    pub category: String,
    pub is_favorite: bool,
}

impl ItemDto {
    pub fn from_catalog(id: ItemId, item: CatalogItem, is_favorite: bool) -> Self {
        Self {
            id,
            name: item.name,
            price_cents: item.price_cents,
            category: item.category,
            is_favorite,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<ItemDto>,
}
