pub mod aggregate;

pub use aggregate::{Conciliation, ConciliationCreate};
