pub mod cart_service;
pub mod delivery_service;
pub mod favorite_service;
pub mod order_service;
pub mod rating_service;
