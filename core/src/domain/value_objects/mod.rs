//! Value objects returned by the identity services.

pub mod auth_response;

pub use auth_response::{AuthResponse, RegisterResponse};
