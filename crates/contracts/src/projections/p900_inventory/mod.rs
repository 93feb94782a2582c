pub mod dto;

pub use dto::InventoryItem;
