pub mod auth;
pub mod pages;
pub mod tecopos;
