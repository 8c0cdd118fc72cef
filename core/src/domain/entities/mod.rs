//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, JWT_AUDIENCE, JWT_ISSUER, SESSION_TOKEN_EXPIRY_MINUTES};
pub use user::User;
