pub mod auth;
pub mod cleanup;
