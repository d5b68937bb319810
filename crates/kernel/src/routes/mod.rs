//! HTTP route handlers.

pub mod auth;
pub mod front;
pub mod health;
pub mod seed;
