use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod deliveries;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod items;
pub mod orders;
pub mod params;
pub mod ratings;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/deliveries", deliveries::router())
        .nest("/favorites", favorites::router())
        .nest("/users", ratings::router())
}
