//! Core services.

pub mod token;
