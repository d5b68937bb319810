//! Data models.

pub mod user;

pub use user::{CreateUser, CreateUserError, User};
