pub mod auth;
pub mod fleet;
pub mod inventory;
pub mod passenger;
