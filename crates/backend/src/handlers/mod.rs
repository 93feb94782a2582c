pub mod a001_sale;
pub mod a002_conciliation;
pub mod p900_inventory;
pub mod tecopos;
