pub mod cart;
pub mod deliveries;
pub mod items;
pub mod orders;
pub mod ratings;
