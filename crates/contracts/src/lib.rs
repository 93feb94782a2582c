pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod system;
