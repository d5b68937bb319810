//! HTTP middleware components.
//!
//! Request flow: locale redirector first, then the path protection
//! gate, then routes.

pub mod auth_gate;
pub mod locale;

pub use auth_gate::protect_paths;
pub use locale::localize_path;
