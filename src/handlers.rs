pub mod admin;
pub mod auth;
pub mod fleet;
pub mod inventory;
pub mod passengers;
