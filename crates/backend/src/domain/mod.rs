pub mod a001_sale;
pub mod a002_conciliation;
