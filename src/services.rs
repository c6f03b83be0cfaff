pub mod auth;
pub mod fleet_service;
pub use fleet_service::FleetService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod passenger_service;
pub use passenger_service::PassengerService;
