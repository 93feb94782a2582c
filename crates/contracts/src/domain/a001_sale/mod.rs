pub mod aggregate;

pub use aggregate::{SaleProduct, SalesQuery, SalesResponse, SalesTotals, SALES_DATETIME_FORMAT};
