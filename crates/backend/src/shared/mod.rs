pub mod config;
pub mod crypto;
pub mod data;
pub mod error;
pub mod marketplaces;
