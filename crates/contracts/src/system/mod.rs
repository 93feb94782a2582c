pub mod auth;
pub mod tecopos;
