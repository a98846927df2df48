pub mod inventory;
pub use inventory::{
    Category, CreateItemPayload, InventoryItem, InventoryStatistics, StockStatus,
    StockTransaction, Supplier,
};
