pub mod stores;
pub use stores::{FleetStore, InventoryStore, PassengerStore, UserStore};
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod fleet_repo;
pub use fleet_repo::FleetRepository;
pub mod passenger_repo;
pub use passenger_repo::PassengerRepository;

#[cfg(test)]
pub mod memory;
