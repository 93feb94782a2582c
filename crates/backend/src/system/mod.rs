pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod suppliers;
pub mod tecopos;
pub mod tracing;
