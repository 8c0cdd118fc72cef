//! Session token service module
//!
//! Signs and validates the JWT session credential consumed by the transport
//! layer for authorization on unrelated endpoints (cart, orders, admin).

mod config;
mod service;

pub use config::TokenServiceConfig;
pub use service::TokenService;
