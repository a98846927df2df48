pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod seed_service;
pub use seed_service::SeedService;
